//! CRC32C (Castagnoli) and the checksum mask.
//!
//! Plain CRCs are weak when the checksummed data itself contains CRCs or is a
//! short, low-entropy field such as an encoded length. Every checksum stored
//! in an event file is therefore passed through [`mask`] first.

/// Reversed Castagnoli polynomial.
pub const CASTAGNOLI_POLY: u32 = 0x82F6_3B78;

/// Constant added by [`mask`] after the rotation.
pub const CRC_MASK_DELTA: u32 = 0xa282_ead8;

const CRC32C_TABLE: [u32; 256] = build_table();

const fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ CASTAGNOLI_POLY
            } else {
                crc >> 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Incremental CRC32C hasher.
///
/// # Example
///
/// ```
/// use tfevent_storage::format::{crc32c, Crc32c};
///
/// let mut hasher = Crc32c::new();
/// hasher.update(b"1234");
/// hasher.update(b"56789");
/// assert_eq!(hasher.finalize(), crc32c(b"123456789"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Crc32c {
    state: u32,
}

impl Crc32c {
    /// Create a hasher with the standard initial value.
    pub fn new() -> Self {
        Self { state: !0 }
    }

    /// Feed bytes into the hasher.
    pub fn update(&mut self, bytes: &[u8]) {
        let mut crc = self.state;
        for &b in bytes {
            crc = CRC32C_TABLE[((crc ^ b as u32) & 0xFF) as usize] ^ (crc >> 8);
        }
        self.state = crc;
    }

    /// Return the checksum of everything fed so far.
    pub fn finalize(self) -> u32 {
        !self.state
    }
}

impl Default for Crc32c {
    fn default() -> Self {
        Self::new()
    }
}

/// CRC32C of `bytes`.
#[inline]
pub fn crc32c(bytes: &[u8]) -> u32 {
    let mut hasher = Crc32c::new();
    hasher.update(bytes);
    hasher.finalize()
}

/// Rotate right by 15 bits and add [`CRC_MASK_DELTA`], modulo 2^32.
#[inline]
pub fn mask(crc: u32) -> u32 {
    crc.rotate_right(15).wrapping_add(CRC_MASK_DELTA)
}

/// Inverse of [`mask`].
#[inline]
pub fn unmask(masked: u32) -> u32 {
    masked.wrapping_sub(CRC_MASK_DELTA).rotate_left(15)
}

/// `mask(crc32c(bytes))`, the checksum stored in frames.
#[inline]
pub fn masked_crc32c(bytes: &[u8]) -> u32 {
    mask(crc32c(bytes))
}
