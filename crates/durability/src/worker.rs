//! Background worker loop
//!
//! ```text
//!           ┌──────────────────────────────────────────┐
//!           ▼                                          │
//!   wait until deadline ──(close wakes early)──┐       │
//!           │                                  │       │
//!   wait for ≥1 record ◀───────────────────────┘       │
//!           │ closed and empty ──▶ exit                │
//!           ▼                                          │
//!   drain ALL queued records                           │
//!   encode + append each frame                         │
//!   sync once (SyncMode)                               │
//!   deadline = now + flush interval ───────────────────┘
//! ```
//!
//! The worker is the only code that touches the file. Any write or sync error
//! is fatal: the queue is closed so producers stop blocking, and the error is
//! returned through the thread's join handle.

use crate::sink::EventSink;
use crate::stats::WriterStats;
use crate::sync::SyncMode;
use parking_lot::Mutex;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tfevent_concurrency::BoundedQueue;
use tfevent_core::{Error, Record, Result, WriterState};
use tfevent_storage::encode_record_into;
use tracing::{debug, error};

/// Cap on how far ahead a deadline may be scheduled.
const MAX_DEADLINE_AHEAD: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// State shared between the writer handle and its worker.
pub(crate) struct Shared {
    state: AtomicU8,
    flush_interval_ms: AtomicU64,
    stats: Mutex<WriterStats>,
    failure: Mutex<Option<(io::ErrorKind, String)>>,
}

impl Shared {
    pub(crate) fn new(flush_interval_ms: u64) -> Self {
        Self {
            state: AtomicU8::new(WriterState::Active.as_u8()),
            flush_interval_ms: AtomicU64::new(flush_interval_ms),
            stats: Mutex::new(WriterStats::default()),
            failure: Mutex::new(None),
        }
    }

    pub(crate) fn state(&self) -> WriterState {
        WriterState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Move forward to `next`. Returns `false` if that would not be forward.
    pub(crate) fn advance(&self, next: WriterState) -> bool {
        self.state
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |cur| {
                WriterState::from_u8(cur)
                    .can_transition_to(next)
                    .then_some(next.as_u8())
            })
            .is_ok()
    }

    pub(crate) fn flush_interval(&self) -> Duration {
        Duration::from_millis(self.flush_interval_ms.load(Ordering::Relaxed))
    }

    pub(crate) fn set_flush_interval_ms(&self, millis: u64) {
        self.flush_interval_ms.store(millis, Ordering::Relaxed);
    }

    pub(crate) fn stats(&self) -> WriterStats {
        *self.stats.lock()
    }

    pub(crate) fn has_failed(&self) -> bool {
        self.failure.lock().is_some()
    }

    /// Error handed to a producer whose record was refused.
    pub(crate) fn rejection(&self) -> Error {
        match &*self.failure.lock() {
            Some((kind, msg)) => Error::Io(io::Error::new(
                *kind,
                format!("event writer failed: {}", msg),
            )),
            None => Error::Closed,
        }
    }
}

pub(crate) struct Worker<S: EventSink> {
    path: PathBuf,
    out: BufWriter<S>,
    queue: Arc<BoundedQueue<Record>>,
    shared: Arc<Shared>,
    sync_mode: SyncMode,
}

impl<S: EventSink> Worker<S> {
    pub(crate) fn new(
        path: PathBuf,
        out: BufWriter<S>,
        queue: Arc<BoundedQueue<Record>>,
        shared: Arc<Shared>,
        sync_mode: SyncMode,
    ) -> Self {
        Self {
            path,
            out,
            queue,
            shared,
            sync_mode,
        }
    }

    /// Run until the queue is closed and empty.
    pub(crate) fn run(mut self) -> Result<WriterStats> {
        // First drain is due immediately
        let mut deadline = Instant::now();

        loop {
            self.queue.wait_until(deadline);
            if !self.queue.wait_for_items() {
                break;
            }

            let batch = self.queue.drain();
            match self.write_batch(&batch) {
                Ok(bytes) => {
                    self.shared.stats.lock().record_batch(&batch, bytes);
                    debug!(
                        path = %self.path.display(),
                        records = batch.len(),
                        bytes,
                        "Persisted batch"
                    );
                }
                Err(e) => {
                    self.fail(&e, batch.len());
                    return Err(Error::Io(e));
                }
            }

            deadline = next_deadline(self.shared.flush_interval());
        }

        debug!(path = %self.path.display(), "Writer thread drained and exiting");
        Ok(self.shared.stats())
    }

    /// Append every record of `batch` as a frame, then sync once.
    fn write_batch(&mut self, batch: &[Record]) -> io::Result<u64> {
        let mut bytes = 0u64;
        for record in batch {
            bytes += encode_record_into(&record.payload, &mut self.out)? as u64;
        }
        self.sync_mode.apply(&mut self.out)?;
        Ok(bytes)
    }

    fn fail(&self, e: &io::Error, in_flight: usize) {
        *self.shared.failure.lock() = Some((e.kind(), e.to_string()));
        self.queue.close();
        let dropped = self.queue.drain().len();
        error!(
            path = %self.path.display(),
            error = %e,
            in_flight,
            dropped,
            "Event writer failed, no further records will be persisted"
        );
    }
}

fn next_deadline(interval: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(interval.min(MAX_DEADLINE_AHEAD))
        .unwrap_or(now)
}
