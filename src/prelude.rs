//! Convenient imports for tfevent.
//!
//! ```ignore
//! use tfevent::prelude::*;
//!
//! let writer = EventLogWriter::new("./logs/run1")?;
//! writer.enqueue(payload, step)?;
//! writer.close()?;
//! ```

// Writer
pub use crate::{EventLogWriter, FileNaming, SyncMode, WriterConfig, WriterStats};

// Error handling
pub use crate::{Error, Result};

// Records
pub use crate::{Record, Step, WriterState};

// Reading back
pub use crate::{FrameError, FrameReader};

pub use std::time::Duration;
