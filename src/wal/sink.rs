//! Append-only byte sinks
//!
//! The writer only needs `append` and `flush`. Durability (fsync), rotation and
//! preallocation belong to whoever owns the sink.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::{Config, OpenMode};
use crate::error::Result;

/// Destination for log bytes
pub trait Sink {
    /// Append `data` at the end of the stream
    fn append(&mut self, data: &[u8]) -> io::Result<()>;

    /// Push buffered bytes toward the OS. Not a durable sync.
    fn flush(&mut self) -> io::Result<()>;
}

/// In-memory sink
impl Sink for Vec<u8> {
    fn append(&mut self, data: &[u8]) -> io::Result<()> {
        self.extend_from_slice(data);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Adapter exposing any `Write` as a sink
#[derive(Debug)]
pub struct IoSink<W: Write> {
    inner: W,
}

impl<W: Write> IoSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Sink for IoSink<W> {
    fn append(&mut self, data: &[u8]) -> io::Result<()> {
        self.inner.write_all(data)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Buffered append-only log file
///
/// `flush` drains the buffer into the OS page cache. Call [`FileSink::sync`]
/// for durability.
pub struct FileSink {
    path: PathBuf,
    writer: BufWriter<File>,
    /// Logical stream length: existing file bytes plus everything appended
    len: u64,
}

impl FileSink {
    /// Open (or create) the log file described by `config`
    pub fn open(config: &Config) -> Result<Self> {
        config.validate()?;

        if let Some(parent) = config.log_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut options = OpenOptions::new();
        options.create(true);
        match config.open_mode {
            OpenMode::Append => options.append(true),
            OpenMode::Truncate => options.write(true).truncate(true),
        };
        let file = options.open(&config.log_path)?;
        let len = file.metadata()?.len();

        tracing::debug!(
            path = %config.log_path.display(),
            mode = ?config.open_mode,
            existing_len = len,
            "opened log file"
        );

        Ok(Self {
            path: config.log_path.clone(),
            writer: BufWriter::with_capacity(config.buffer_capacity, file),
            len,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes in the stream, including anything still buffered
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Flush the buffer and fsync file data
    pub fn sync(&mut self) -> Result<()> {
        self.writer.flush()?;
        self.writer.get_ref().sync_data()?;
        tracing::debug!(path = %self.path.display(), len = self.len, "synced log file");
        Ok(())
    }
}

impl Sink for FileSink {
    fn append(&mut self, data: &[u8]) -> io::Result<()> {
        self.writer.write_all(data)?;
        self.len += data.len() as u64;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
