//! Writer statistics

use serde::{Deserialize, Serialize};
use tfevent_core::{Record, Step};

/// Counters maintained by the background worker.
///
/// Updated once per drained batch, after the batch has been synced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriterStats {
    /// Records persisted
    pub records_written: u64,
    /// Frame bytes persisted, including framing overhead
    pub bytes_written: u64,
    /// Drain batches (one sync each)
    pub batches: u64,
    /// Step of the most recently persisted record
    pub last_step: Option<Step>,
}

impl WriterStats {
    /// Account for one synced batch.
    pub(crate) fn record_batch(&mut self, batch: &[Record], bytes: u64) {
        if batch.is_empty() {
            return;
        }
        self.records_written += batch.len() as u64;
        self.bytes_written += bytes;
        self.batches += 1;
        self.last_step = batch.last().map(|r| r.step);
    }
}
