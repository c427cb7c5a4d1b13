//! Lifecycle Tests
//!
//! Open, close, idempotent close, drop, and state transitions.

use crate::*;

#[test]
fn test_zero_records_then_close_leaves_empty_file() {
    let (_tmp, writer) = open_fast(10);

    let stats = writer.close().unwrap();

    assert_eq!(stats, WriterStats::default());
    assert!(writer.path().exists());
    assert_eq!(std::fs::metadata(writer.path()).unwrap().len(), 0);
}

#[test]
fn test_close_does_not_wait_for_interval() {
    init_tracing();
    let tmp = TempDir::new().unwrap();
    let config = WriterConfig::new(tmp.path()).with_flush_interval_ms(60_000);
    let writer = EventLogWriter::with_config(config).unwrap();
    writer.enqueue(payload(0), 0).unwrap();
    assert!(wait_for(Duration::from_secs(5), || writer.stats().records_written == 1));
    writer.enqueue(payload(1), 1).unwrap();

    let started = std::time::Instant::now();
    writer.close().unwrap();
    assert!(started.elapsed() < Duration::from_secs(30));
    assert_eq!(read_payloads(writer.path()), vec![payload(0), payload(1)]);
}

#[test]
fn test_state_transitions() {
    let (_tmp, writer) = open_fast(4);
    assert_eq!(writer.state(), WriterState::Active);

    writer.close().unwrap();
    assert_eq!(writer.state(), WriterState::Closed);
}

#[test]
fn test_close_twice_returns_same_stats() {
    let (_tmp, writer) = open_fast(4);
    writer.enqueue(payload(1), 1).unwrap();

    let first = writer.close().unwrap();
    let second = writer.close().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.records_written, 1);
}

#[test]
fn test_enqueue_after_close_is_closed_error() {
    let (_tmp, writer) = open_fast(4);
    writer.close().unwrap();

    let err = writer.enqueue(payload(0), 0).unwrap_err();
    assert!(err.is_closed());
    assert!(read_payloads(writer.path()).is_empty());
}

#[test]
fn test_drop_drains_queue() {
    init_tracing();
    let tmp = TempDir::new().unwrap();
    let path = {
        let writer = EventLogWriter::with_config(fast_config(tmp.path())).unwrap();
        for i in 0..5 {
            writer.enqueue(payload(i), i).unwrap();
        }
        writer.path().to_path_buf()
    };

    let expected: Vec<Vec<u8>> = (0..5).map(payload).collect();
    assert_eq!(read_payloads(&path), expected);
}

#[test]
fn test_accessors() {
    init_tracing();
    let tmp = TempDir::new().unwrap();
    let config = WriterConfig::new(tmp.path())
        .with_max_queue_capacity(7)
        .with_flush_interval(Duration::from_millis(250))
        .with_sync_mode(SyncMode::All);
    let writer = EventLogWriter::with_config(config).unwrap();

    assert_eq!(writer.log_dir(), tmp.path());
    assert_eq!(writer.path().parent(), Some(tmp.path()));
    assert_eq!(writer.max_queue_capacity(), 7);
    assert_eq!(writer.flush_interval(), Duration::from_millis(250));
    assert_eq!(writer.sync_mode(), SyncMode::All);
    assert_eq!(writer.queued(), 0);

    writer.set_flush_interval(Duration::from_millis(5));
    assert_eq!(writer.flush_interval(), Duration::from_millis(5));
    writer.close().unwrap();
}

#[test]
fn test_fsync_modes_write_same_bytes() {
    init_tracing();
    let mut files = Vec::new();
    for mode in [SyncMode::Flush, SyncMode::Data, SyncMode::All] {
        let tmp = TempDir::new().unwrap();
        let writer = EventLogWriter::with_config(fast_config(tmp.path()).with_sync_mode(mode)).unwrap();
        for i in 0..3 {
            writer.enqueue(payload(i), i).unwrap();
        }
        writer.close().unwrap();
        files.push(std::fs::read(writer.path()).unwrap());
    }
    assert_eq!(files[0], files[1]);
    assert_eq!(files[1], files[2]);
}
