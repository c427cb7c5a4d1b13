//! Sync mode for drained batches.
//!
//! Defines how far each batch is pushed towards stable storage.

use crate::sink::EventSink;
use serde::{Deserialize, Serialize};
use std::io::{self, BufWriter, Write};

/// Sync mode applied once per drained batch.
///
/// Controls the trade-off between flush cost and how much survives a crash.
///
/// # Mode Comparison
///
/// | Mode | Call | Survives |
/// |------|------|----------|
/// | Flush | `BufWriter::flush` | process crash |
/// | Data | `File::sync_data` | power loss (file contents) |
/// | All | `File::sync_all` | power loss (contents + metadata) |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// Hand buffered bytes to the OS without fsync.
    ///
    /// Data is lost only if the machine goes down before the kernel writes
    /// it back. Use case: tests, scratch runs.
    Flush,

    /// Flush, then fsync file contents.
    #[default]
    Data,

    /// Flush, then fsync contents and metadata.
    ///
    /// Use when the file's size and timestamps must also be durable.
    All,
}

impl SyncMode {
    /// Check if this mode issues an fsync.
    pub fn requires_fsync(&self) -> bool {
        !matches!(self, SyncMode::Flush)
    }

    /// Human-readable description of the mode.
    pub fn description(&self) -> &'static str {
        match self {
            SyncMode::Flush => "Flush to OS (fast, survives process crash)",
            SyncMode::Data => "fsync file data (durable contents)",
            SyncMode::All => "fsync data and metadata (slowest, fully durable)",
        }
    }

    /// Push everything buffered in `out` as far as this mode requires.
    pub(crate) fn apply<S: EventSink>(&self, out: &mut BufWriter<S>) -> io::Result<()> {
        out.flush()?;
        match self {
            SyncMode::Flush => Ok(()),
            SyncMode::Data => out.get_mut().sync_data(),
            SyncMode::All => out.get_mut().sync_all(),
        }
    }
}
