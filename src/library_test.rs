use std::time::{SystemTime, UNIX_EPOCH};

use super::*;

fn temp_path(tag: &str) -> PathBuf {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| d.as_nanos());
    std::env::temp_dir().join(format!("courtside-{tag}-{}-{nanos}.json", std::process::id()))
}

#[tokio::test]
async fn load_reads_catalog() {
    let path = temp_path("ok");
    let body = r#"{
        "drills": [{ "id": 1, "name": "Serve", "duration": 5, "courtElements": [
            { "type": "player", "id": 1, "x": 150.0, "y": 560.0 }
        ] }],
        "routines": [{ "id": 1, "name": "Morning", "drillIds": [1] }]
    }"#;
    tokio::fs::write(&path, body).await.unwrap();

    let catalog = load(&path).await.unwrap();
    assert_eq!(catalog.drills.len(), 1);
    assert_eq!(catalog.routines[0].drill_ids, vec![1]);

    tokio::fs::remove_file(&path).await.unwrap();
}

#[tokio::test]
async fn missing_file_is_io_error() {
    let path = temp_path("missing");
    let err = load(&path).await.unwrap_err();
    assert!(matches!(err, LibraryError::Io { .. }));
    assert_eq!(err.error_code(), "E_LIBRARY_IO");
    assert!(err.to_string().starts_with("cannot read drill library"));
}

#[tokio::test]
async fn malformed_file_is_json_error() {
    let path = temp_path("bad");
    tokio::fs::write(&path, "{ \"drills\": [ { \"id\": \"x\" } ] }").await.unwrap();

    let err = load(&path).await.unwrap_err();
    assert!(matches!(err, LibraryError::Json { .. }));
    assert_eq!(err.error_code(), "E_LIBRARY_JSON");

    tokio::fs::remove_file(&path).await.unwrap();
}
