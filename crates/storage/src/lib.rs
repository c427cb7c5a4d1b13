//! Storage layer for tfevent
//!
//! This crate owns the on-disk byte format of event files:
//! - CRC32C (Castagnoli) checksums and the rotate-and-offset mask
//! - Frame encoding: length, length checksum, payload, payload checksum
//! - Frame decoding with checksum validation
//! - `FrameReader`: sequential iteration over a written file

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod format;

pub use format::{
    crc32c, decode_frame, decode_record, encode_record, encode_record_into, encoded_len, mask,
    masked_crc32c, read_all_frames, unmask, FrameError, FrameField, FrameReader, FRAME_OVERHEAD,
};
