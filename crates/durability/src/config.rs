//! Writer configuration
//!
//! All settings are fixed at construction except the queue capacity and the
//! flush interval, which [`EventLogWriter`](crate::EventLogWriter) can change
//! while running.
//!
//! ```ignore
//! let config = WriterConfig::new("./logs/run1")
//!     .with_max_queue_capacity(32)
//!     .with_flush_interval(Duration::from_secs(1))
//!     .with_sync_mode(SyncMode::Flush);
//! let writer = EventLogWriter::with_config(config)?;
//! ```

use crate::naming::FileNaming;
use crate::sync::SyncMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tfevent_core::{Error, Result};

/// Default number of records the queue holds before producers block.
pub const DEFAULT_MAX_QUEUE_CAPACITY: usize = 10;

/// Default time between drains, in milliseconds.
pub const DEFAULT_FLUSH_INTERVAL_MS: u64 = 5000;

/// Default size of the user-space write buffer.
pub const DEFAULT_WRITE_BUFFER_SIZE: usize = 64 * 1024;

fn default_max_queue_capacity() -> usize {
    DEFAULT_MAX_QUEUE_CAPACITY
}

fn default_flush_interval_ms() -> u64 {
    DEFAULT_FLUSH_INTERVAL_MS
}

fn default_write_buffer_size() -> usize {
    DEFAULT_WRITE_BUFFER_SIZE
}

/// Construction-time configuration for an event log writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriterConfig {
    /// Directory the event file is created in
    pub directory: PathBuf,

    /// Maximum queued records before `enqueue` blocks (≥ 1)
    #[serde(default = "default_max_queue_capacity")]
    pub max_queue_capacity: usize,

    /// Minimum time between drains, in milliseconds
    #[serde(default = "default_flush_interval_ms")]
    pub flush_interval_ms: u64,

    /// How far each drained batch is pushed towards disk
    #[serde(default)]
    pub sync_mode: SyncMode,

    /// File naming scheme
    #[serde(default)]
    pub naming: FileNaming,

    /// Create `directory` (and parents) if it does not exist
    #[serde(default)]
    pub create_dir: bool,

    /// Capacity of the buffer between the encoder and the file
    #[serde(default = "default_write_buffer_size")]
    pub write_buffer_size: usize,
}

impl WriterConfig {
    /// Configuration with defaults for everything but the directory.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            max_queue_capacity: DEFAULT_MAX_QUEUE_CAPACITY,
            flush_interval_ms: DEFAULT_FLUSH_INTERVAL_MS,
            sync_mode: SyncMode::default(),
            naming: FileNaming::default(),
            create_dir: false,
            write_buffer_size: DEFAULT_WRITE_BUFFER_SIZE,
        }
    }

    /// Set the queue capacity.
    pub fn with_max_queue_capacity(mut self, capacity: usize) -> Self {
        self.max_queue_capacity = capacity;
        self
    }

    /// Set the flush interval.
    ///
    /// Sub-millisecond precision is dropped.
    pub fn with_flush_interval(mut self, interval: Duration) -> Self {
        self.flush_interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the flush interval in milliseconds.
    pub fn with_flush_interval_ms(mut self, millis: u64) -> Self {
        self.flush_interval_ms = millis;
        self
    }

    /// Set the sync mode.
    pub fn with_sync_mode(mut self, mode: SyncMode) -> Self {
        self.sync_mode = mode;
        self
    }

    /// Set the file naming scheme.
    pub fn with_naming(mut self, naming: FileNaming) -> Self {
        self.naming = naming;
        self
    }

    /// Create the directory on construction if missing.
    pub fn with_create_dir(mut self, create: bool) -> Self {
        self.create_dir = create;
        self
    }

    /// Set the write buffer capacity.
    pub fn with_write_buffer_size(mut self, size: usize) -> Self {
        self.write_buffer_size = size;
        self
    }

    /// Flush interval as a `Duration`.
    pub fn flush_interval(&self) -> Duration {
        Duration::from_millis(self.flush_interval_ms)
    }

    /// Check settings that do not touch the filesystem.
    pub fn validate(&self) -> Result<()> {
        if self.max_queue_capacity == 0 {
            return Err(Error::config("max_queue_capacity must be at least 1"));
        }
        if self.directory.as_os_str().is_empty() {
            return Err(Error::config("directory must not be empty"));
        }
        Ok(())
    }

    /// Make sure the directory exists and can hold a new file.
    ///
    /// Creates it first when `create_dir` is set.
    pub(crate) fn prepare_directory(&self) -> Result<&Path> {
        let dir = self.directory.as_path();
        if self.create_dir {
            fs::create_dir_all(dir).map_err(|e| {
                Error::config(format!("cannot create directory {}: {}", dir.display(), e))
            })?;
        }

        let meta = fs::metadata(dir).map_err(|e| {
            Error::config(format!("cannot access directory {}: {}", dir.display(), e))
        })?;
        if !meta.is_dir() {
            return Err(Error::config(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
        if meta.permissions().readonly() {
            return Err(Error::config(format!(
                "directory {} is read-only",
                dir.display()
            )));
        }
        Ok(dir)
    }
}
