//! On-disk byte format for event files.
//!
//! This module centralizes all serialization logic for persistent storage.
//! Keeping the frame format separate from the writer (how frames are queued,
//! batched and flushed) keeps the format bit-exact and independently testable.
//!
//! # Module Structure
//!
//! - `crc`: CRC32C and the checksum mask
//! - `frame`: single-frame encode/decode
//! - `reader`: sequential frame iteration over a stream or file
//!
//! # Frame Layout
//!
//! ```text
//! ┌──────────────┬──────────────┬─────────────────┬──────────────┐
//! │ length (u64) │ len crc (u32)│ payload (bytes) │ data crc(u32)│
//! │   8 bytes LE │   4 bytes LE │  `length` bytes │   4 bytes LE │
//! └──────────────┴──────────────┴─────────────────┴──────────────┘
//! ```
//!
//! Both checksums are `masked_crc32c` values.

pub mod crc;
pub mod frame;
pub mod reader;

pub use crc::{crc32c, mask, masked_crc32c, unmask, Crc32c, CASTAGNOLI_POLY, CRC_MASK_DELTA};
pub use frame::{
    decode_frame, decode_record, encode_record, encode_record_into, encoded_len, FrameError,
    FrameField, CRC_FIELD_SIZE, FRAME_HEADER_SIZE, FRAME_OVERHEAD, LENGTH_FIELD_SIZE,
};
pub use reader::{read_all_frames, FrameReader};
