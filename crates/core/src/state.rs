//! Writer lifecycle state
//!
//! ```text
//! Active ──close()──▶ Draining ──worker joined──▶ Closed
//! ```
//!
//! Transitions only move forward. A writer never returns to `Active`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of an event log writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum WriterState {
    /// Accepting records
    Active = 0,
    /// Close requested; the worker is persisting what is left in the queue
    Draining = 1,
    /// Worker joined and file released
    Closed = 2,
}

impl WriterState {
    /// Decode from the `u8` representation used for atomic storage.
    ///
    /// Unknown values map to `Closed`.
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => WriterState::Active,
            1 => WriterState::Draining,
            _ => WriterState::Closed,
        }
    }

    /// Encode as `u8` for atomic storage.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Check whether a transition to `next` is allowed.
    ///
    /// Only forward moves are valid. Staying in the same state is not a
    /// transition.
    pub fn can_transition_to(self, next: WriterState) -> bool {
        next > self
    }

    /// Check if the writer still accepts records.
    pub fn accepts_records(self) -> bool {
        self == WriterState::Active
    }

    /// Check if the writer has fully shut down.
    pub fn is_closed(self) -> bool {
        self == WriterState::Closed
    }
}

impl fmt::Display for WriterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WriterState::Active => "active",
            WriterState::Draining => "draining",
            WriterState::Closed => "closed",
        };
        f.write_str(s)
    }
}
