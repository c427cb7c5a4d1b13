//! # tfevent
//!
//! Asynchronous, crash-bounded writer for checksum-framed event log files.
//!
//! Producers hand serialized records to an [`EventLogWriter`]. A background
//! thread drains them into an append-only file named
//! `events.out.tfevents.<unix seconds>.v2`, framing each one with its length
//! and two masked CRC32C checksums so readers can detect torn or corrupted
//! writes.
//!
//! ## Quick Start
//!
//! ```ignore
//! use tfevent::prelude::*;
//!
//! let writer = EventLogWriter::with_config(
//!     WriterConfig::new("./logs/run1").with_flush_interval(Duration::from_secs(1)),
//! )?;
//! writer.enqueue(b"serialized event".to_vec(), 0)?;
//! let stats = writer.close()?;
//!
//! for payload in FrameReader::open(writer.path())? {
//!     let payload = payload?;
//! }
//! ```
//!
//! ## Crates
//!
//! - [`tfevent_core`]: errors, records, writer state
//! - [`tfevent_storage`]: CRC32C, frame encoding and decoding, frame reader
//! - [`tfevent_concurrency`]: blocking bounded queue
//! - [`tfevent_durability`]: configuration, background worker, writer

#![warn(missing_docs)]

pub mod prelude;

pub use tfevent_concurrency::{BoundedQueue, Closed};
pub use tfevent_core::{Error, Record, Result, Step, WriterState};
pub use tfevent_durability::{
    event_file_name, event_file_path, EventLogWriter, EventSink, FileNaming, SyncMode,
    WriterConfig, WriterStats, DEFAULT_FLUSH_INTERVAL_MS, DEFAULT_MAX_QUEUE_CAPACITY,
    DEFAULT_WRITE_BUFFER_SIZE, FILE_PREFIX, FILE_SUFFIX, WORKER_THREAD_NAME,
};
pub use tfevent_storage::{
    crc32c, decode_frame, decode_record, encode_record, encode_record_into, encoded_len, mask,
    masked_crc32c, read_all_frames, unmask, FrameError, FrameField, FrameReader, FRAME_OVERHEAD,
};

/// Re-exported member crates.
pub mod crates {
    pub use tfevent_concurrency as concurrency;
    pub use tfevent_core as core;
    pub use tfevent_durability as durability;
    pub use tfevent_storage as storage;
}
