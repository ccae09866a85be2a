//! Drill library file: a JSON catalog of drills and routines.

#[cfg(test)]
#[path = "library_test.rs"]
mod library_test;

use std::path::{Path, PathBuf};

use court::catalog::Catalog;
use court::error::ErrorCode;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("cannot read drill library {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("drill library {} is not valid: {source}", path.display())]
    Json { path: PathBuf, source: serde_json::Error },
}

impl ErrorCode for LibraryError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "E_LIBRARY_IO",
            Self::Json { .. } => "E_LIBRARY_JSON",
        }
    }
}

/// Read and parse the library at `path`.
///
/// # Errors
///
/// Returns [`LibraryError`] if the file cannot be read or is not a catalog.
pub async fn load(path: &Path) -> Result<Catalog, LibraryError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LibraryError::Io { path: path.to_path_buf(), source })?;
    let catalog: Catalog = serde_json::from_str(&raw)
        .map_err(|source| LibraryError::Json { path: path.to_path_buf(), source })?;
    info!(
        path = %path.display(),
        drills = catalog.drills.len(),
        routines = catalog.routines.len(),
        "library loaded"
    );
    Ok(catalog)
}
