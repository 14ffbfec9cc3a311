//! Shared helpers for integration tests
//!
//! A block-aware chunk parser that checks framing and checksums, and a sink
//! whose failures can be scripted.

#![allow(dead_code)]

use std::io;

use blocklog::wal::{chunk_checksum, unmask, ChunkHeader, RecordType, Sink, BLOCK_SIZE, HEADER_SIZE};

// =============================================================================
// Chunk Parsing
// =============================================================================

/// One physical chunk found in a log stream
#[derive(Debug, Clone)]
pub struct Chunk {
    pub offset: usize,
    pub record_type: RecordType,
    pub payload: Vec<u8>,
}

/// Parse every chunk in `buf`, which must start at a block boundary.
///
/// Panics on bad checksums, non-zero block trailers, chunks that cross a block
/// boundary, or a truncated final chunk.
pub fn parse_chunks(buf: &[u8]) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut pos = 0usize;

    while pos < buf.len() {
        let room = BLOCK_SIZE - pos % BLOCK_SIZE;
        if room < HEADER_SIZE {
            let end = (pos + room).min(buf.len());
            assert!(
                buf[pos..end].iter().all(|&b| b == 0),
                "non-zero block trailer at offset {}",
                pos
            );
            pos += room;
            continue;
        }

        assert!(pos + HEADER_SIZE <= buf.len(), "truncated header at offset {}", pos);
        let mut raw = [0u8; HEADER_SIZE];
        raw.copy_from_slice(&buf[pos..pos + HEADER_SIZE]);
        let header = ChunkHeader::decode(&raw);
        let record_type = header.record_type().expect("valid record type");
        let length = header.length as usize;

        assert!(
            (pos % BLOCK_SIZE) + HEADER_SIZE + length <= BLOCK_SIZE,
            "chunk at offset {} crosses a block boundary",
            pos
        );
        let start = pos + HEADER_SIZE;
        assert!(start + length <= buf.len(), "truncated payload at offset {}", pos);
        let payload = buf[start..start + length].to_vec();

        assert_eq!(
            unmask(header.checksum),
            chunk_checksum(record_type, &payload),
            "checksum mismatch at offset {}",
            pos
        );

        chunks.push(Chunk {
            offset: pos,
            record_type,
            payload,
        });
        pos = start + length;
    }

    chunks
}

/// Reassemble logical records, asserting FULL | FIRST MIDDLE* LAST ordering
pub fn reassemble(chunks: &[Chunk]) -> Vec<Vec<u8>> {
    let mut records = Vec::new();
    let mut pending: Option<Vec<u8>> = None;

    for chunk in chunks {
        match chunk.record_type {
            RecordType::Full => {
                assert!(pending.is_none(), "FULL inside fragmented record at {}", chunk.offset);
                records.push(chunk.payload.clone());
            }
            RecordType::First => {
                assert!(pending.is_none(), "FIRST inside fragmented record at {}", chunk.offset);
                pending = Some(chunk.payload.clone());
            }
            RecordType::Middle => {
                let buf = pending.as_mut().expect("MIDDLE without FIRST");
                buf.extend_from_slice(&chunk.payload);
            }
            RecordType::Last => {
                let mut buf = pending.take().expect("LAST without FIRST");
                buf.extend_from_slice(&chunk.payload);
                records.push(buf);
            }
            RecordType::Zero => panic!("ZERO chunk at offset {}", chunk.offset),
        }
    }

    assert!(pending.is_none(), "unterminated fragmented record");
    records
}

/// Parse and reassemble in one step
pub fn read_records(buf: &[u8]) -> Vec<Vec<u8>> {
    reassemble(&parse_chunks(buf))
}

/// Deterministic, non-uniform payload
pub fn pattern(len: usize, seed: u8) -> Vec<u8> {
    (0..len)
        .map(|i| (i as u32).wrapping_mul(31).wrapping_add(seed as u32) as u8)
        .collect()
}

// =============================================================================
// Scripted Sink
// =============================================================================

/// In-memory sink that can fail a chosen append or every flush
#[derive(Debug, Default)]
pub struct ScriptedSink {
    pub data: Vec<u8>,
    pub appends: usize,
    pub flushes: usize,
    /// 1-based index of the append call that fails
    pub fail_append_at: Option<usize>,
    pub fail_flush: bool,
}

impl ScriptedSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_append(n: usize) -> Self {
        Self {
            fail_append_at: Some(n),
            ..Self::default()
        }
    }

    pub fn failing_flush() -> Self {
        Self {
            fail_flush: true,
            ..Self::default()
        }
    }
}

impl Sink for ScriptedSink {
    fn append(&mut self, data: &[u8]) -> io::Result<()> {
        self.appends += 1;
        if self.fail_append_at == Some(self.appends) {
            return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
        }
        self.data.extend_from_slice(data);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        if self.fail_flush {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "flush failed"));
        }
        Ok(())
    }
}
