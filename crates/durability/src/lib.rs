//! Durability layer for tfevent
//!
//! This crate implements the asynchronous event log writer:
//! - EventLogWriter: bounded queue + background thread + append-only file
//! - Periodic drain: every queued record is written once the flush deadline passes
//! - Sync modes: Flush, Data (default), All
//! - Graceful close: drain everything, join the worker, release the file
//! - Deterministic file naming: `events.out.tfevents.<unix seconds>.v2`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod naming;
pub mod sink;
pub mod stats;
pub mod sync;
mod worker;
pub mod writer;

pub use config::{
    WriterConfig, DEFAULT_FLUSH_INTERVAL_MS, DEFAULT_MAX_QUEUE_CAPACITY, DEFAULT_WRITE_BUFFER_SIZE,
};
pub use naming::{event_file_name, event_file_path, FileNaming, FILE_PREFIX, FILE_SUFFIX};
pub use sink::EventSink;
pub use stats::WriterStats;
pub use sync::SyncMode;
pub use writer::{EventLogWriter, WORKER_THREAD_NAME};
