//! Backpressure Tests
//!
//! Producers block while the queue is full and resume once the worker drains.

use crate::*;
use std::sync::atomic::{AtomicBool, Ordering};

#[test]
fn test_capacity_one_blocks_second_record() {
    init_tracing();
    let tmp = TempDir::new().unwrap();
    let config = fast_config(tmp.path())
        .with_max_queue_capacity(1)
        .with_flush_interval_ms(300);
    let writer = Arc::new(EventLogWriter::with_config(config).unwrap());

    // First drain is immediate; afterwards the worker sleeps for the interval
    writer.enqueue(b"A".to_vec(), 0).unwrap();
    assert!(wait_for(Duration::from_secs(5), || writer.stats().records_written == 1));

    writer.enqueue(b"B".to_vec(), 1).unwrap();
    assert_eq!(writer.queued(), 1);

    let done = Arc::new(AtomicBool::new(false));
    let producer = thread::spawn({
        let writer = Arc::clone(&writer);
        let done = Arc::clone(&done);
        move || {
            writer.enqueue(b"C".to_vec(), 2).unwrap();
            done.store(true, Ordering::SeqCst);
        }
    });

    thread::sleep(Duration::from_millis(50));
    assert!(!done.load(Ordering::SeqCst), "C must wait for B to be drained");

    producer.join().unwrap();
    assert!(done.load(Ordering::SeqCst));
    writer.close().unwrap();

    assert_eq!(
        read_payloads(writer.path()),
        vec![b"A".to_vec(), b"B".to_vec(), b"C".to_vec()]
    );
}

#[test]
fn test_raising_capacity_lets_producers_through() {
    init_tracing();
    let tmp = TempDir::new().unwrap();
    let config = fast_config(tmp.path())
        .with_max_queue_capacity(1)
        .with_flush_interval_ms(60_000);
    let writer = EventLogWriter::with_config(config).unwrap();

    writer.enqueue(payload(0), 0).unwrap();
    assert!(wait_for(Duration::from_secs(5), || writer.stats().records_written == 1));

    writer.set_max_queue_capacity(5).unwrap();
    for i in 1..=5 {
        writer.enqueue(payload(i), i).unwrap();
    }
    assert_eq!(writer.queued(), 5);

    // close wakes the worker well before the interval elapses
    let stats = writer.close().unwrap();
    assert_eq!(stats.records_written, 6);
    assert_eq!(read_payloads(writer.path()).len(), 6);
}

#[test]
fn test_close_releases_blocked_producer() {
    init_tracing();
    let tmp = TempDir::new().unwrap();
    let config = fast_config(tmp.path())
        .with_max_queue_capacity(1)
        .with_flush_interval_ms(60_000);
    let writer = Arc::new(EventLogWriter::with_config(config).unwrap());

    writer.enqueue(payload(0), 0).unwrap();
    assert!(wait_for(Duration::from_secs(5), || writer.stats().records_written == 1));
    writer.enqueue(payload(1), 1).unwrap();

    let producer = thread::spawn({
        let writer = Arc::clone(&writer);
        move || writer.enqueue(payload(2), 2)
    });
    thread::sleep(Duration::from_millis(50));

    writer.close().unwrap();
    // The blocked record is either refused or written; never lost silently
    let outcome = producer.join().unwrap();
    let frames = read_payloads(writer.path());
    match outcome {
        Ok(()) => assert_eq!(frames, vec![payload(0), payload(1), payload(2)]),
        Err(e) => {
            assert!(e.is_closed());
            assert_eq!(frames, vec![payload(0), payload(1)]);
        }
    }
}
