//! # blocklog
//!
//! The append-only log writer of an embedded storage engine's WAL:
//! - Block-framed physical chunks (32 KB blocks, 7-byte headers)
//! - Masked CRC32C checksums per chunk
//! - Fragmentation of large records across blocks
//! - Resumable cursor for appending to an existing log
//!
//! ## Architecture Overview
//!
//! ```text
//!        caller
//!          │  add_record(&[u8])
//! ┌────────▼─────────┐      ┌────────────────┐
//! │    LogWriter     │─────▶│  TypeCrcTable  │
//! │ (block cursor)   │      │ (per-type CRC) │
//! └────────┬─────────┘      └────────────────┘
//!          │  append / flush
//! ┌────────▼─────────┐
//! │       Sink       │
//! │ (Vec, File, ...) │
//! └──────────────────┘
//! ```
//!
//! Reading the log back, rotation and durable sync policy are left to the
//! surrounding engine.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod wal;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{LogError, Result};
pub use config::{Config, OpenMode};
pub use wal::{FileSink, LogWriter, RecordType, Sink};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of blocklog
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
