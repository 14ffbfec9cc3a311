//! Log record format
//!
//! Layout constants and the physical chunk header shared by the writer and
//! any reader of the log.

use std::fmt;

use bytes::{Buf, BufMut};

use crate::error::{LogError, Result};

/// Size of one block of the log stream
pub const BLOCK_SIZE: usize = 32 * 1024;

/// Header size: checksum (4) + length (2) + type (1)
pub const HEADER_SIZE: usize = 4 + 2 + 1;

/// Largest payload a single chunk can carry (length is a u16)
pub const MAX_CHUNK_LENGTH: usize = 0xFFFF;

/// Largest valid record type tag
pub const MAX_RECORD_TYPE: usize = RecordType::Last as usize;

/// Physical record types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RecordType {
    /// Reserved for preallocated (zeroed) regions, never written
    Zero = 0,

    /// The whole logical record in one chunk
    Full = 1,

    /// First fragment of a logical record
    First = 2,

    /// Interior fragment
    Middle = 3,

    /// Final fragment
    Last = 4,
}

impl RecordType {
    /// All tags in `[0, MAX_RECORD_TYPE]`, in tag order
    pub const ALL: [RecordType; MAX_RECORD_TYPE + 1] = [
        RecordType::Zero,
        RecordType::Full,
        RecordType::First,
        RecordType::Middle,
        RecordType::Last,
    ];

    /// Pick the type of a fragment from its position in the logical record
    pub fn for_fragment(begin: bool, end: bool) -> Self {
        match (begin, end) {
            (true, true) => RecordType::Full,
            (true, false) => RecordType::First,
            (false, true) => RecordType::Last,
            (false, false) => RecordType::Middle,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for RecordType {
    type Error = LogError;

    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(RecordType::Zero),
            1 => Ok(RecordType::Full),
            2 => Ok(RecordType::First),
            3 => Ok(RecordType::Middle),
            4 => Ok(RecordType::Last),
            other => Err(LogError::UnknownRecordType(other)),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordType::Zero => "ZERO",
            RecordType::Full => "FULL",
            RecordType::First => "FIRST",
            RecordType::Middle => "MIDDLE",
            RecordType::Last => "LAST",
        };
        f.write_str(name)
    }
}

/// Header of one physical chunk
///
/// `checksum` is stored masked, exactly as it appears on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    pub checksum: u32,
    pub length: u16,
    pub type_tag: u8,
}

impl ChunkHeader {
    pub fn new(checksum: u32, length: u16, record_type: RecordType) -> Self {
        Self {
            checksum,
            length,
            type_tag: record_type.as_u8(),
        }
    }

    /// Encode to the on-wire form: crc (LE u32) + length (LE u16) + type
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut header = [0u8; HEADER_SIZE];
        let mut buf = &mut header[..];
        buf.put_u32_le(self.checksum);
        buf.put_u16_le(self.length);
        buf.put_u8(self.type_tag);
        header
    }

    /// Decode from the on-wire form. The tag is kept raw.
    pub fn decode(bytes: &[u8; HEADER_SIZE]) -> Self {
        let mut buf = &bytes[..];
        let checksum = buf.get_u32_le();
        let length = buf.get_u16_le();
        let type_tag = buf.get_u8();
        Self {
            checksum,
            length,
            type_tag,
        }
    }

    /// Interpret the raw tag
    pub fn record_type(&self) -> Result<RecordType> {
        RecordType::try_from(self.type_tag)
    }
}
