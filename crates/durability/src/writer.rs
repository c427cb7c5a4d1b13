//! Asynchronous event log writer
//!
//! An [`EventLogWriter`] owns one append-only event file, a bounded queue of
//! pending records, and a background thread that periodically drains the queue
//! into the file.
//!
//! ## Lifecycle
//!
//! ```text
//! new() ──▶ Active ──close()──▶ Draining ──worker joined──▶ Closed
//! ```
//!
//! Producers call [`enqueue`](EventLogWriter::enqueue) from any thread. When
//! the queue is full they block until the worker drains it. Frames land in the
//! file in exactly the order their `enqueue` calls returned.
//!
//! [`close`](EventLogWriter::close) wakes the worker, waits for it to write
//! everything still queued, and returns the worker's final statistics or the
//! I/O error that stopped it.

use crate::config::WriterConfig;
use crate::naming::{event_file_path, FileNaming};
use crate::sink::EventSink;
use crate::stats::WriterStats;
use crate::sync::SyncMode;
use crate::worker::{Shared, Worker};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tfevent_concurrency::BoundedQueue;
use tfevent_core::{Error, Record, Result, Step, WriterState};
use tracing::{error, info, warn};

/// Name of the background thread.
pub const WORKER_THREAD_NAME: &str = "tfevent-writer";

/// Writes length-prefixed, checksummed records to an event file in the
/// background.
///
/// `EventLogWriter` is `Send + Sync`; share it between producers with `Arc`.
///
/// # Example
///
/// ```ignore
/// let writer = EventLogWriter::new("./logs/run1")?;
/// writer.enqueue(serialized_event, step)?;
/// let stats = writer.close()?;
/// ```
pub struct EventLogWriter {
    path: PathBuf,
    log_dir: PathBuf,
    created_at: DateTime<Utc>,
    sync_mode: SyncMode,
    queue: Arc<BoundedQueue<Record>>,
    shared: Arc<Shared>,
    /// `None` once the worker has been joined
    worker: Mutex<Option<JoinHandle<Result<WriterStats>>>>,
    final_stats: Mutex<Option<WriterStats>>,
}

impl EventLogWriter {
    /// Open a writer in `directory` with default settings.
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self> {
        Self::with_config(WriterConfig::new(directory))
    }

    /// Open a writer with explicit settings.
    ///
    /// # Errors
    ///
    /// `Error::Config` if the settings are invalid, the directory is missing or
    /// unwritable, or the event file cannot be opened.
    pub fn with_config(config: WriterConfig) -> Result<Self> {
        config.validate()?;
        let log_dir = config.prepare_directory()?;

        let created_at = Utc::now();
        let path = event_file_path(log_dir, config.naming, created_at);
        let file = open_event_file(&path, config.naming)?;

        Self::spawn_with_sink(&config, path, created_at, file)
    }

    /// Start the worker on an already opened sink.
    pub(crate) fn spawn_with_sink<S: EventSink>(
        config: &WriterConfig,
        path: PathBuf,
        created_at: DateTime<Utc>,
        sink: S,
    ) -> Result<Self> {
        let queue = Arc::new(BoundedQueue::new(config.max_queue_capacity));
        let shared = Arc::new(Shared::new(config.flush_interval_ms));

        let worker = Worker::new(
            path.clone(),
            BufWriter::with_capacity(config.write_buffer_size, sink),
            Arc::clone(&queue),
            Arc::clone(&shared),
            config.sync_mode,
        );
        let handle = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || worker.run())?;

        info!(
            path = %path.display(),
            max_queue_capacity = config.max_queue_capacity,
            flush_interval_ms = config.flush_interval_ms,
            sync_mode = ?config.sync_mode,
            "Opened event writer"
        );

        Ok(Self {
            path,
            log_dir: config.directory.clone(),
            created_at,
            sync_mode: config.sync_mode,
            queue,
            shared,
            worker: Mutex::new(Some(handle)),
            final_stats: Mutex::new(None),
        })
    }

    /// Queue one serialized record.
    ///
    /// Blocks while the queue is full. Never blocks once the writer is closing
    /// or the worker has failed.
    ///
    /// # Errors
    ///
    /// `Error::Closed` after `close()` was requested; `Error::Io` carrying the
    /// worker's failure if the worker stopped on an I/O error.
    pub fn enqueue(&self, payload: impl Into<Vec<u8>>, step: Step) -> Result<()> {
        self.enqueue_record(Record::new(payload, step))
    }

    /// Queue an already built record.
    pub fn enqueue_record(&self, record: Record) -> Result<()> {
        if !self.shared.state().accepts_records() {
            return Err(Error::Closed);
        }
        self.queue.push(record).map_err(|_| self.shared.rejection())
    }

    /// Drain everything queued, stop the worker and release the file.
    ///
    /// Idempotent: later calls return the same statistics, or `Error::Closed`
    /// if the first call failed.
    pub fn close(&self) -> Result<WriterStats> {
        let mut worker = self.worker.lock();
        let Some(handle) = worker.take() else {
            return (*self.final_stats.lock()).ok_or(Error::Closed);
        };

        self.shared.advance(WriterState::Draining);
        self.queue.close();

        let outcome = match handle.join() {
            Ok(result) => result,
            Err(_) => Err(Error::WorkerPanicked),
        };
        self.shared.advance(WriterState::Closed);

        match outcome {
            Ok(stats) => {
                *self.final_stats.lock() = Some(stats);
                info!(
                    path = %self.path.display(),
                    records = stats.records_written,
                    bytes = stats.bytes_written,
                    batches = stats.batches,
                    "Closed event writer"
                );
                Ok(stats)
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Event writer closed with error");
                Err(e)
            }
        }
    }

    /// Path of the event file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory the event file lives in.
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Wall-clock time the file name was derived from.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Sync mode applied to each batch.
    pub fn sync_mode(&self) -> SyncMode {
        self.sync_mode
    }

    /// Current lifecycle state.
    pub fn state(&self) -> WriterState {
        self.shared.state()
    }

    /// Check if the worker stopped on an I/O error.
    pub fn has_failed(&self) -> bool {
        self.shared.has_failed()
    }

    /// Records waiting to be written.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Current queue capacity.
    pub fn max_queue_capacity(&self) -> usize {
        self.queue.capacity()
    }

    /// Change the queue capacity.
    ///
    /// Records already queued are kept even if they exceed the new capacity;
    /// producers block until the queue is below it.
    pub fn set_max_queue_capacity(&self, capacity: usize) -> Result<()> {
        if capacity == 0 {
            return Err(Error::config("max_queue_capacity must be at least 1"));
        }
        self.queue.set_capacity(capacity);
        Ok(())
    }

    /// Current time between drains.
    pub fn flush_interval(&self) -> Duration {
        self.shared.flush_interval()
    }

    /// Change the time between drains.
    ///
    /// Takes effect when the worker schedules its next deadline.
    pub fn set_flush_interval(&self, interval: Duration) {
        let millis = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self.shared.set_flush_interval_ms(millis);
    }

    /// Counters for everything persisted so far.
    pub fn stats(&self) -> WriterStats {
        self.shared.stats()
    }
}

impl Drop for EventLogWriter {
    fn drop(&mut self) {
        if self.worker.get_mut().is_none() {
            return;
        }
        if let Err(e) = self.close() {
            error!(path = %self.path.display(), error = %e, "Failed to close event writer on drop");
        }
    }
}

impl std::fmt::Debug for EventLogWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLogWriter")
            .field("path", &self.path)
            .field("state", &self.state())
            .field("queued", &self.queued())
            .field("max_queue_capacity", &self.max_queue_capacity())
            .finish()
    }
}

/// Open the event file for writing.
///
/// Default naming truncates whatever is already at `path`; unique naming
/// refuses to touch an existing file.
fn open_event_file(path: &Path, naming: FileNaming) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true);
    if naming.is_exclusive() {
        options.create_new(true);
    } else {
        options.create(true).truncate(true);
    }
    options.open(path).map_err(|e| {
        Error::config(format!("cannot open event file {}: {}", path.display(), e))
    })
}
