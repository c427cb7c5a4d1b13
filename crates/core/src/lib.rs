//! Core types for tfevent
//!
//! This crate defines the types shared by every layer of the writer:
//! - [`Record`]: an opaque payload plus the step it was produced at
//! - [`WriterState`]: the one-directional writer lifecycle
//! - [`Error`] / [`Result`]: the error taxonomy surfaced to callers

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod record;
pub mod state;

pub use error::{Error, Result};
pub use record::{Record, Step};
pub use state::WriterState;
