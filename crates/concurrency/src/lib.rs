//! Concurrency layer for tfevent
//!
//! This crate implements the hand-off between producers and the writer thread:
//! - BoundedQueue: blocking FIFO with a fixed (runtime adjustable) capacity
//! - Backpressure: `push` blocks while the queue is full
//! - Close signal: wakes every waiter so the consumer can drain and exit

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod queue;

pub use queue::{BoundedQueue, Closed};
