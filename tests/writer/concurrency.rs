//! Concurrent Producer Tests
//!
//! Many threads share one writer; every record lands exactly once and each
//! producer's records keep their relative order.

use crate::*;
use std::collections::HashMap;

#[test]
fn test_concurrent_producers_lose_nothing() {
    const PRODUCERS: u64 = 8;
    const PER_PRODUCER: u64 = 200;

    let (_tmp, writer) = open_fast(4);
    let writer = Arc::new(writer);

    let handles: Vec<_> = (0..PRODUCERS)
        .map(|p| {
            let writer = Arc::clone(&writer);
            thread::spawn(move || {
                for i in 0..PER_PRODUCER {
                    let record = format!("{}:{}", p, i);
                    writer.enqueue(record.into_bytes(), p * PER_PRODUCER + i).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let stats = writer.close().unwrap();
    assert_eq!(stats.records_written, PRODUCERS * PER_PRODUCER);

    let mut next_expected: HashMap<u64, u64> = HashMap::new();
    for frame in read_payloads(writer.path()) {
        let text = String::from_utf8(frame).unwrap();
        let (p, i) = text.split_once(':').unwrap();
        let (p, i): (u64, u64) = (p.parse().unwrap(), i.parse().unwrap());
        let expected = next_expected.entry(p).or_insert(0);
        assert_eq!(i, *expected, "producer {} out of order", p);
        *expected += 1;
    }
    assert_eq!(next_expected.len() as u64, PRODUCERS);
    assert!(next_expected.values().all(|&n| n == PER_PRODUCER));
}

#[test]
fn test_close_while_producers_running() {
    let (_tmp, writer) = open_fast(2);
    let writer = Arc::new(writer);

    let handles: Vec<_> = (0..4u64)
        .map(|p| {
            let writer = Arc::clone(&writer);
            thread::spawn(move || {
                let mut accepted = 0u64;
                for i in 0..10_000u64 {
                    match writer.enqueue(payload(i), p) {
                        Ok(()) => accepted += 1,
                        Err(e) => {
                            assert!(e.is_closed());
                            break;
                        }
                    }
                }
                accepted
            })
        })
        .collect();

    thread::sleep(Duration::from_millis(20));
    let stats = writer.close().unwrap();
    let accepted: u64 = handles.into_iter().map(|h| h.join().unwrap()).sum();

    assert_eq!(stats.records_written, accepted);
    assert_eq!(read_payloads(writer.path()).len() as u64, accepted);
}
