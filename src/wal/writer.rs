//! Log Writer
//!
//! Splits logical records into checksummed chunks that never straddle a
//! block boundary, and appends them to a borrowed sink.

use crate::error::Result;

use super::checksum::{self, TypeCrcTable};
use super::format::{ChunkHeader, RecordType, BLOCK_SIZE, HEADER_SIZE, MAX_CHUNK_LENGTH};
use super::sink::Sink;

/// Zero bytes used to fill a block trailer too small for a header
const TRAILER: [u8; HEADER_SIZE - 1] = [0; HEADER_SIZE - 1];

/// Appends logical records to a block-framed log
///
/// One writer must be driven by one caller at a time; chunks of concurrent
/// records would interleave in the sink.
pub struct LogWriter<'a, S: Sink + ?Sized> {
    dest: &'a mut S,
    /// Position inside the current block, always < BLOCK_SIZE between calls
    block_offset: usize,
    type_crc: TypeCrcTable,
}

impl<'a, S: Sink + ?Sized> LogWriter<'a, S> {
    /// Create a writer for an empty stream
    pub fn new(dest: &'a mut S) -> Self {
        Self::with_block_offset(dest, 0)
    }

    /// Create a writer that continues a stream already `dest_length` bytes long
    pub fn with_dest_length(dest: &'a mut S, dest_length: u64) -> Self {
        let block_offset = (dest_length % BLOCK_SIZE as u64) as usize;
        tracing::debug!(dest_length, block_offset, "resuming log writer");
        Self::with_block_offset(dest, block_offset)
    }

    fn with_block_offset(dest: &'a mut S, block_offset: usize) -> Self {
        Self {
            dest,
            block_offset,
            type_crc: TypeCrcTable::new(),
        }
    }

    /// Current position inside the current block
    pub fn block_offset(&self) -> usize {
        self.block_offset
    }

    pub fn type_crc_table(&self) -> &TypeCrcTable {
        &self.type_crc
    }

    /// Append one logical record
    ///
    /// An empty record still produces a single zero-length FULL chunk. On the
    /// first sink failure the error is returned; chunks already appended stay
    /// in the sink.
    pub fn add_record(&mut self, record: &[u8]) -> Result<()> {
        let mut left = record;
        let mut begin = true;

        loop {
            let leftover = BLOCK_SIZE - self.block_offset;
            if leftover < HEADER_SIZE {
                // Switch to a new block
                self.block_offset = 0;
                if leftover > 0 {
                    tracing::debug!(padding = leftover, "filling block trailer");
                    if let Err(e) = self.dest.append(&TRAILER[..leftover]) {
                        tracing::warn!("Failed to pad block trailer: {}", e);
                        return Err(e.into());
                    }
                }
            }

            // Never leave fewer than HEADER_SIZE bytes in a block
            debug_assert!(BLOCK_SIZE - self.block_offset >= HEADER_SIZE);

            let avail = BLOCK_SIZE - self.block_offset - HEADER_SIZE;
            let fragment_length = left.len().min(avail);
            let end = fragment_length == left.len();
            let record_type = RecordType::for_fragment(begin, end);

            let (fragment, rest) = left.split_at(fragment_length);
            self.emit_physical_record(record_type, fragment)?;
            left = rest;
            begin = false;

            if left.is_empty() {
                return Ok(());
            }
        }
    }

    fn emit_physical_record(&mut self, record_type: RecordType, payload: &[u8]) -> Result<()> {
        let length = payload.len();
        assert!(length <= MAX_CHUNK_LENGTH, "chunk length {} exceeds u16", length);
        assert!(
            self.block_offset + HEADER_SIZE + length <= BLOCK_SIZE,
            "chunk of {} bytes at offset {} crosses block boundary",
            length,
            self.block_offset
        );

        let crc = checksum::mask(self.type_crc.checksum(record_type, payload));
        let header = ChunkHeader::new(crc, length as u16, record_type).encode();

        tracing::trace!(
            record_type = %record_type,
            length,
            block_offset = self.block_offset,
            "emitting chunk"
        );

        let mut result = self.dest.append(&header);
        if result.is_ok() {
            result = self.dest.append(payload);
        }
        if result.is_ok() {
            result = self.dest.flush();
        }

        // The cursor tracks the intended stream position even on failure.
        // A block filled exactly starts the next one without padding.
        self.block_offset += HEADER_SIZE + length;
        if self.block_offset == BLOCK_SIZE {
            self.block_offset = 0;
        }

        if let Err(e) = result {
            tracing::warn!("Failed to write {} chunk of {} bytes: {}", record_type, length, e);
            return Err(e.into());
        }
        Ok(())
    }
}
