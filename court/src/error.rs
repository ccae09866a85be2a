//! Error types surfaced to the user as notices.
//!
//! Every error here is recoverable at the point of the triggering action: the
//! operation is aborted before any state is touched, so the caller can show
//! the `Display` text and let the user retry.

use crate::doc::ElementId;

/// Stable machine-readable code for an error, used by hosts to pick a notice.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;
}

/// Failures of an editing action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("Please click on a player first to add a {0}.")]
    NoPlayerSelected(&'static str),
    #[error("player {0} is not on the court")]
    UnknownPlayer(ElementId),
    #[error("No elements to flip!")]
    NothingToFlip,
}

impl ErrorCode for EditError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoPlayerSelected(_) => "E_NO_PLAYER_SELECTED",
            Self::UnknownPlayer(_) => "E_UNKNOWN_PLAYER",
            Self::NothingToFlip => "E_NOTHING_TO_FLIP",
        }
    }
}

/// Failures looking up drills and routines.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Drill not found: {0}")]
    DrillNotFound(i64),
    #[error("Routine not found: {0}")]
    RoutineNotFound(i64),
}

impl ErrorCode for CatalogError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DrillNotFound(_) => "E_DRILL_NOT_FOUND",
            Self::RoutineNotFound(_) => "E_ROUTINE_NOT_FOUND",
        }
    }
}

/// Failures starting a practice session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Please select a routine first.")]
    NoRoutineSelected,
    #[error("Routine not found: {0}")]
    RoutineNotFound(i64),
    #[error("This routine has no valid drills.")]
    NoValidDrills,
}

impl ErrorCode for SessionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoRoutineSelected => "E_NO_ROUTINE_SELECTED",
            Self::RoutineNotFound(_) => "E_ROUTINE_NOT_FOUND",
            Self::NoValidDrills => "E_NO_VALID_DRILLS",
        }
    }
}

/// Failure reported by a drawing surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("surface {surface}: {message}")]
pub struct SurfaceError {
    pub surface: &'static str,
    pub message: String,
}

impl SurfaceError {
    #[must_use]
    pub fn new(surface: &'static str, message: impl Into<String>) -> Self {
        Self { surface, message: message.into() }
    }
}

impl ErrorCode for SurfaceError {
    fn error_code(&self) -> &'static str {
        "E_SURFACE"
    }
}
