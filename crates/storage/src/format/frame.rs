//! Single-frame encoding and decoding.

use super::crc::masked_crc32c;
use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use std::fmt;
use std::io::{self, Cursor, ErrorKind, Read, Write};
use thiserror::Error;

/// Size of the little-endian payload length field.
pub const LENGTH_FIELD_SIZE: usize = 8;

/// Size of each masked checksum field.
pub const CRC_FIELD_SIZE: usize = 4;

/// Length field plus its checksum.
pub const FRAME_HEADER_SIZE: usize = LENGTH_FIELD_SIZE + CRC_FIELD_SIZE;

/// Bytes a frame adds around its payload.
pub const FRAME_OVERHEAD: usize = FRAME_HEADER_SIZE + CRC_FIELD_SIZE;

/// Which checksum of a frame failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameField {
    /// Checksum over the 8 length bytes
    Length,
    /// Checksum over the payload bytes
    Payload,
}

impl fmt::Display for FrameField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameField::Length => f.write_str("length"),
            FrameField::Payload => f.write_str("payload"),
        }
    }
}

/// Frame decoding errors.
#[derive(Debug, Error)]
pub enum FrameError {
    /// Stored checksum does not match the recomputed one
    #[error("{field} checksum mismatch: stored {stored:#010x}, computed {computed:#010x}")]
    Corrupt {
        /// Field whose checksum failed
        field: FrameField,
        /// Masked checksum read from the stream
        stored: u32,
        /// Masked checksum computed over the bytes read
        computed: u32,
    },

    /// Stream ended inside a frame
    #[error("truncated frame: needed {needed} bytes, got {have}")]
    Truncated {
        /// Bytes the current field required
        needed: u64,
        /// Bytes actually available
        have: u64,
    },

    /// Underlying read failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl FrameError {
    /// Check if this error is a checksum mismatch or a torn frame.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, FrameError::Corrupt { .. } | FrameError::Truncated { .. })
    }
}

impl From<FrameError> for tfevent_core::Error {
    fn from(e: FrameError) -> Self {
        match e {
            FrameError::Io(io_err) => tfevent_core::Error::Io(io_err),
            other => tfevent_core::Error::FrameCorrupt(other.to_string()),
        }
    }
}

/// Total encoded size of a frame carrying `payload_len` bytes.
#[inline]
pub fn encoded_len(payload_len: usize) -> usize {
    FRAME_OVERHEAD + payload_len
}

/// Encode `payload` as one frame.
pub fn encode_record(payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(encoded_len(payload.len()));
    // Writing into a Vec cannot fail
    let _ = encode_record_into(payload, &mut buf);
    buf
}

/// Encode `payload` as one frame directly into `out`.
///
/// Returns the number of bytes written.
pub fn encode_record_into<W: Write>(payload: &[u8], out: &mut W) -> io::Result<usize> {
    let len_bytes = (payload.len() as u64).to_le_bytes();

    out.write_all(&len_bytes)?;
    out.write_u32::<LittleEndian>(masked_crc32c(&len_bytes))?;
    out.write_all(payload)?;
    out.write_u32::<LittleEndian>(masked_crc32c(payload))?;

    Ok(encoded_len(payload.len()))
}

/// Decode the next frame from `reader`.
///
/// Returns `Ok(None)` when the stream ends cleanly on a frame boundary. The
/// length checksum is verified before any payload bytes are read, so a
/// corrupted length never drives a large allocation.
pub fn decode_record<R: Read>(reader: &mut R) -> Result<Option<Vec<u8>>, FrameError> {
    let mut header = [0u8; FRAME_HEADER_SIZE];
    let got = read_full(reader, &mut header)?;
    if got == 0 {
        return Ok(None);
    }
    if got < FRAME_HEADER_SIZE {
        return Err(FrameError::Truncated {
            needed: FRAME_HEADER_SIZE as u64,
            have: got as u64,
        });
    }

    let len_bytes = &header[..LENGTH_FIELD_SIZE];
    let stored = LittleEndian::read_u32(&header[LENGTH_FIELD_SIZE..]);
    let computed = masked_crc32c(len_bytes);
    if stored != computed {
        return Err(FrameError::Corrupt {
            field: FrameField::Length,
            stored,
            computed,
        });
    }
    let len = LittleEndian::read_u64(len_bytes);

    let mut payload = Vec::new();
    reader.by_ref().take(len).read_to_end(&mut payload)?;
    if (payload.len() as u64) < len {
        return Err(FrameError::Truncated {
            needed: len,
            have: payload.len() as u64,
        });
    }

    let mut trailer = [0u8; CRC_FIELD_SIZE];
    let got = read_full(reader, &mut trailer)?;
    if got < CRC_FIELD_SIZE {
        return Err(FrameError::Truncated {
            needed: CRC_FIELD_SIZE as u64,
            have: got as u64,
        });
    }

    let stored = LittleEndian::read_u32(&trailer);
    let computed = masked_crc32c(&payload);
    if stored != computed {
        return Err(FrameError::Corrupt {
            field: FrameField::Payload,
            stored,
            computed,
        });
    }

    Ok(Some(payload))
}

/// Decode one frame from the front of `bytes`.
///
/// Returns the payload and the number of bytes the frame occupied.
pub fn decode_frame(bytes: &[u8]) -> Result<(Vec<u8>, usize), FrameError> {
    let mut cursor = Cursor::new(bytes);
    match decode_record(&mut cursor)? {
        Some(payload) => Ok((payload, cursor.position() as usize)),
        None => Err(FrameError::Truncated {
            needed: FRAME_HEADER_SIZE as u64,
            have: 0,
        }),
    }
}

/// Fill `buf` from `reader`, stopping early only at end of stream.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
