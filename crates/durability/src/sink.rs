//! Destination the background worker writes frames into.

use std::fs::File;
use std::io::{self, Write};

/// Byte sink with fsync support.
///
/// Implemented for [`File`]. The worker is generic over this trait so tests can
/// inject sinks that fail on demand.
pub trait EventSink: Write + Send + 'static {
    /// Persist file contents.
    fn sync_data(&mut self) -> io::Result<()>;

    /// Persist file contents and metadata.
    fn sync_all(&mut self) -> io::Result<()>;
}

impl EventSink for File {
    fn sync_data(&mut self) -> io::Result<()> {
        File::sync_data(self)
    }

    fn sync_all(&mut self) -> io::Result<()> {
        File::sync_all(self)
    }
}
