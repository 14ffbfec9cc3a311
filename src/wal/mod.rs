//! Write-Ahead Log (WAL) Module
//!
//! Serializes logical records into a stream of fixed-size blocks.
//!
//! ## Responsibilities
//! - Fragment records so no chunk header straddles a block boundary
//! - CRC32C checksums (masked) for corruption detection on replay
//! - Resume appending onto a partially written stream
//!
//! ## File Format
//! ```text
//! ┌──────────────────────── Block (32 KB) ─────────────────────────┐
//! │ ┌─────────┬─────────┬──────────┬──────────────┐                │
//! │ │ CRC (4) │ Len (2) │ Type (1) │ Payload      │  ...  │ 0-pad  │
//! │ └─────────┴─────────┴──────────┴──────────────┘                │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A record that does not fit in the rest of a block is split into
//! FIRST, MIDDLE..., LAST chunks. A block tail shorter than a header is
//! zero-filled and skipped.

mod checksum;
mod format;
mod sink;
mod writer;

pub use checksum::{chunk_checksum, extend, mask, unmask, value, TypeCrcTable};
pub use format::{
    ChunkHeader, RecordType, BLOCK_SIZE, HEADER_SIZE, MAX_CHUNK_LENGTH, MAX_RECORD_TYPE,
};
pub use sink::{FileSink, IoSink, Sink};
pub use writer::LogWriter;
