//! Chunk checksums
//!
//! CRC32C over (type byte, payload), masked before storage so that a run of
//! zero bytes never reads back as a valid zero-length chunk.

use super::format::{RecordType, MAX_RECORD_TYPE};

/// Added after rotation when masking
const MASK_DELTA: u32 = 0xA282_EAD8;

/// CRC32C of `data`
#[inline]
pub fn value(data: &[u8]) -> u32 {
    crc32c::crc32c(data)
}

/// Extend `seed` (a CRC32C of some prefix) with more bytes
#[inline]
pub fn extend(seed: u32, data: &[u8]) -> u32 {
    crc32c::crc32c_append(seed, data)
}

/// Transform a crc for storage
#[inline]
pub fn mask(crc: u32) -> u32 {
    crc.rotate_right(15).wrapping_add(MASK_DELTA)
}

/// Inverse of [`mask`]
#[inline]
pub fn unmask(masked: u32) -> u32 {
    masked.wrapping_sub(MASK_DELTA).rotate_left(15)
}

/// Unmasked checksum of a chunk with the given type and payload
pub fn chunk_checksum(record_type: RecordType, payload: &[u8]) -> u32 {
    extend(value(&[record_type.as_u8()]), payload)
}

/// Per-type checksum seeds: `value([tag])` for every tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeCrcTable {
    seeds: [u32; MAX_RECORD_TYPE + 1],
}

impl TypeCrcTable {
    pub fn new() -> Self {
        let mut seeds = [0u32; MAX_RECORD_TYPE + 1];
        for (tag, seed) in seeds.iter_mut().enumerate() {
            *seed = value(&[tag as u8]);
        }
        Self { seeds }
    }

    /// Seed for `record_type`
    #[inline]
    pub fn seed(&self, record_type: RecordType) -> u32 {
        self.seeds[record_type as usize]
    }

    /// Unmasked checksum of `payload` under `record_type`
    #[inline]
    pub fn checksum(&self, record_type: RecordType, payload: &[u8]) -> u32 {
        extend(self.seed(record_type), payload)
    }
}

impl Default for TypeCrcTable {
    fn default() -> Self {
        Self::new()
    }
}
