//! Ordering Tests
//!
//! Frames appear in the file in push order, one per enqueued record.

use crate::*;

#[test]
fn test_n_records_written_in_push_order() {
    let (_tmp, writer) = open_fast(64);

    for i in 0..50 {
        writer.enqueue(payload(i), i).unwrap();
    }
    let stats = writer.close().unwrap();

    let expected: Vec<Vec<u8>> = (0..50).map(payload).collect();
    assert_eq!(read_payloads(writer.path()), expected);
    assert_eq!(stats.records_written, 50);
    assert_eq!(stats.last_step, Some(49));
}

#[test]
fn test_records_larger_than_capacity_all_written() {
    let (_tmp, writer) = open_fast(2);

    for i in 0..40 {
        writer.enqueue(payload(i), i).unwrap();
    }
    writer.close().unwrap();

    let expected: Vec<Vec<u8>> = (0..40).map(payload).collect();
    assert_eq!(read_payloads(writer.path()), expected);
}

#[test]
fn test_empty_and_binary_payloads() {
    let (_tmp, writer) = open_fast(8);
    let binary: Vec<u8> = (0..=255u8).collect();

    writer.enqueue(Vec::new(), 0).unwrap();
    writer.enqueue(binary.clone(), 1).unwrap();
    writer.enqueue(vec![0u8; 100_000], 2).unwrap();
    writer.close().unwrap();

    let frames = read_payloads(writer.path());
    assert_eq!(frames.len(), 3);
    assert!(frames[0].is_empty());
    assert_eq!(frames[1], binary);
    assert_eq!(frames[2], vec![0u8; 100_000]);
}

#[test]
fn test_file_size_matches_stats() {
    let (_tmp, writer) = open_fast(16);
    for i in 0..10 {
        writer.enqueue(payload(i), i).unwrap();
    }
    let stats = writer.close().unwrap();

    let on_disk = std::fs::metadata(writer.path()).unwrap().len();
    assert_eq!(stats.bytes_written, on_disk);
    assert_eq!(on_disk, 10 * tfevent::encoded_len(payload(0).len()) as u64);
}

#[test]
fn test_records_visible_before_close() {
    let (_tmp, writer) = open_fast(8);
    writer.enqueue(payload(0), 0).unwrap();

    assert!(
        wait_for(Duration::from_secs(5), || writer.stats().records_written == 1),
        "worker should persist the record without waiting for close"
    );
    assert_eq!(read_payloads(writer.path()), vec![payload(0)]);
    writer.close().unwrap();
}
