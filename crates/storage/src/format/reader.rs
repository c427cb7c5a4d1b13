//! Sequential frame reader
//!
//! Iterates the frames of an event file in write order. Parsing is fail-fast:
//! the first checksum mismatch or torn frame is yielded as an error and the
//! iterator ends. There is no attempt to resynchronize past bad bytes.

use super::frame::{decode_record, encoded_len, FrameError};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Iterator over the frames of a stream.
///
/// # Example
///
/// ```ignore
/// for payload in FrameReader::open(&path)? {
///     let payload = payload?;
///     // hand the bytes to a downstream parser
/// }
/// ```
pub struct FrameReader<R: Read> {
    inner: R,
    frames_read: u64,
    bytes_read: u64,
    done: bool,
}

impl FrameReader<BufReader<File>> {
    /// Open an event file for reading.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FrameError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        debug!(path = %path.display(), "Opened event file for reading");
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> FrameReader<R> {
    /// Wrap any reader positioned at a frame boundary.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            frames_read: 0,
            bytes_read: 0,
            done: false,
        }
    }

    /// Number of frames decoded successfully so far.
    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    /// Byte offset just past the last good frame.
    pub fn valid_len(&self) -> u64 {
        self.bytes_read
    }

    /// Recover the underlying reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Iterator for FrameReader<R> {
    type Item = Result<Vec<u8>, FrameError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match decode_record(&mut self.inner) {
            Ok(Some(payload)) => {
                self.frames_read += 1;
                self.bytes_read += encoded_len(payload.len()) as u64;
                Some(Ok(payload))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                debug!(
                    frames_read = self.frames_read,
                    offset = self.bytes_read,
                    error = %e,
                    "Stopped reading event file"
                );
                Some(Err(e))
            }
        }
    }
}

/// Read every frame payload of the file at `path`.
///
/// Fails on the first corrupt or truncated frame.
pub fn read_all_frames(path: impl AsRef<Path>) -> Result<Vec<Vec<u8>>, FrameError> {
    FrameReader::open(path)?.collect()
}
