//! Configuration Error Tests
//!
//! Bad settings and unusable directories fail at construction.

use crate::*;

#[test]
fn test_zero_capacity_rejected() {
    let tmp = TempDir::new().unwrap();
    let err = EventLogWriter::with_config(WriterConfig::new(tmp.path()).with_max_queue_capacity(0))
        .unwrap_err();
    assert!(err.is_config());
}

#[test]
fn test_missing_directory_rejected() {
    let tmp = TempDir::new().unwrap();
    let err = EventLogWriter::new(tmp.path().join("does-not-exist")).unwrap_err();
    assert!(err.is_config());
    assert!(!tmp.path().join("does-not-exist").exists());
}

#[test]
fn test_path_is_a_file_rejected() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("not-a-dir");
    std::fs::write(&file, b"").unwrap();

    assert!(EventLogWriter::new(&file).unwrap_err().is_config());
}

#[test]
fn test_create_dir_option() {
    init_tracing();
    let tmp = TempDir::new().unwrap();
    let nested = tmp.path().join("runs").join("42");
    let writer = EventLogWriter::with_config(fast_config(&nested).with_create_dir(true)).unwrap();

    assert!(writer.path().starts_with(&nested));
    writer.close().unwrap();
}

#[test]
fn test_config_from_json() {
    init_tracing();
    let tmp = TempDir::new().unwrap();
    let json = serde_json::json!({
        "directory": tmp.path(),
        "max_queue_capacity": 3,
        "flush_interval_ms": 10,
        "sync_mode": "flush"
    });
    let config: WriterConfig = serde_json::from_value(json).unwrap();
    let writer = EventLogWriter::with_config(config).unwrap();

    assert_eq!(writer.max_queue_capacity(), 3);
    assert_eq!(writer.sync_mode(), SyncMode::Flush);
    writer.close().unwrap();
}

#[cfg(unix)]
#[test]
fn test_readonly_directory_rejected() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("locked");
    std::fs::create_dir(&dir).unwrap();
    std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o555)).unwrap();

    let result = EventLogWriter::new(&dir);
    std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o755)).unwrap();

    assert!(result.unwrap_err().is_config());
}
