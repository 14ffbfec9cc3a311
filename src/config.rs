//! Configuration for blocklog
//!
//! Settings for file-backed sinks, with sensible defaults.

use std::path::PathBuf;

use crate::error::{LogError, Result};

/// Main configuration for a file-backed log
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // File Configuration
    // -------------------------------------------------------------------------
    /// Path of the log file. Parent directories are created on open.
    pub log_path: PathBuf,

    /// Whether to continue an existing file or start a fresh one
    pub open_mode: OpenMode,

    // -------------------------------------------------------------------------
    // Buffering Configuration
    // -------------------------------------------------------------------------
    /// Capacity of the in-process write buffer (in bytes).
    /// A flush drains this buffer to the OS; it does not fsync.
    pub buffer_capacity: usize,
}

/// How an existing log file is treated on open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Keep existing contents and append after them
    Append,

    /// Discard existing contents
    Truncate,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("./blocklog_data/wal.log"),
            open_mode: OpenMode::Append,
            buffer_capacity: 64 * 1024, // 64 KB
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the settings before they are used to open a file
    pub fn validate(&self) -> Result<()> {
        if self.log_path.as_os_str().is_empty() {
            return Err(LogError::Config("log_path must not be empty".to_string()));
        }
        if self.buffer_capacity == 0 {
            return Err(LogError::Config(
                "buffer_capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the log file path
    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.log_path = path.into();
        self
    }

    /// Set the open mode
    pub fn open_mode(mut self, mode: OpenMode) -> Self {
        self.config.open_mode = mode;
        self
    }

    /// Set the write buffer capacity (in bytes)
    pub fn buffer_capacity(mut self, bytes: usize) -> Self {
        self.config.buffer_capacity = bytes;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
