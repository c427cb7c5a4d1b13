//! Error types for tfevent
//!
//! Three failure classes exist and none of them is retried:
//!
//! | Variant | Raised by | Meaning |
//! |---------|-----------|---------|
//! | `Config` | writer construction | directory invalid, unwritable, or bad settings |
//! | `Io` | background worker, `close()` | a write or flush failed; the writer is dead |
//! | `FrameCorrupt` | frame decoding | a checksum mismatch or a torn frame |
//!
//! `Closed` and `WorkerPanicked` describe lifecycle misuse and worker loss.

use std::io;
use thiserror::Error;

/// All tfevent errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or unwritable configuration, raised synchronously at construction
    #[error("configuration error: {0}")]
    Config(String),

    /// Write or flush failure on the event file
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Frame failed checksum validation or ended early
    #[error("corrupt frame: {0}")]
    FrameCorrupt(String),

    /// The writer no longer accepts records
    #[error("writer is closed")]
    Closed,

    /// The background worker panicked before it could report a result
    #[error("background writer thread panicked")]
    WorkerPanicked,
}

/// Result type for tfevent operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build a configuration error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Check if this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    /// Check if this is an I/O error.
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io(_))
    }

    /// Check if this is a frame corruption error.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Error::FrameCorrupt(_))
    }

    /// Check if the writer was already closed.
    pub fn is_closed(&self) -> bool {
        matches!(self, Error::Closed)
    }
}
