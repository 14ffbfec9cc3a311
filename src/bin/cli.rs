//! blocklog CLI
//!
//! Appends logical records to a block-framed log file.

use std::io::{self, BufRead};
use std::path::PathBuf;

use blocklog::wal::BLOCK_SIZE;
use blocklog::{Config, FileSink, LogWriter, OpenMode, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

/// blocklog CLI
#[derive(Parser, Debug)]
#[command(name = "blocklog-cli")]
#[command(about = "Append records to a block-framed write-ahead log")]
#[command(version)]
struct Args {
    /// Log file path
    #[arg(short, long, default_value = "./blocklog_data/wal.log")]
    path: PathBuf,

    /// Start a fresh log instead of appending to an existing one
    #[arg(short, long)]
    truncate: bool,

    /// fsync the log once all records are written
    #[arg(short, long)]
    sync: bool,

    /// Write buffer size in KB
    #[arg(short, long, default_value = "64")]
    buffer_kb: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Append each argument as one record
    Append {
        /// Records to append
        #[arg(required = true)]
        records: Vec<String>,
    },

    /// Append each line of standard input as one record
    Stdin,

    /// Append generated records of a fixed size
    Fill {
        /// Number of records
        #[arg(short, long, default_value = "1")]
        count: usize,

        /// Size of each record in bytes
        #[arg(short, long)]
        size: usize,

        /// Byte value to fill records with
        #[arg(long, default_value = "120")]
        byte: u8,
    },
}

/// Totals reported after a run
#[derive(Debug, Default)]
struct Summary {
    records: u64,
    bytes: u64,
}

impl Summary {
    fn add(&mut self, record: &[u8]) {
        self.records += 1;
        self.bytes += record.len() as u64;
    }
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,blocklog=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let args = Args::parse();

    tracing::info!("blocklog v{}", blocklog::VERSION);
    tracing::info!("Log file: {}", args.path.display());

    if let Err(e) = run(args) {
        tracing::error!("Failed to write log: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let open_mode = if args.truncate {
        OpenMode::Truncate
    } else {
        OpenMode::Append
    };

    let config = Config::builder()
        .log_path(&args.path)
        .open_mode(open_mode)
        .buffer_capacity(args.buffer_kb * 1024)
        .build();

    let mut sink = FileSink::open(&config)?;
    let existing_len = sink.len();

    let mut summary = Summary::default();
    let block_offset = {
        let mut writer = LogWriter::with_dest_length(&mut sink, existing_len);

        match args.command {
            Commands::Append { records } => {
                for record in &records {
                    writer.add_record(record.as_bytes())?;
                    summary.add(record.as_bytes());
                }
            }
            Commands::Stdin => {
                let stdin = io::stdin();
                for line in stdin.lock().lines() {
                    let line = line?;
                    writer.add_record(line.as_bytes())?;
                    summary.add(line.as_bytes());
                }
            }
            Commands::Fill { count, size, byte } => {
                let record = vec![byte; size];
                for _ in 0..count {
                    writer.add_record(&record)?;
                    summary.add(&record);
                }
            }
        }

        writer.block_offset()
    };

    if args.sync {
        sink.sync()?;
    }

    tracing::info!(
        "Appended {} records ({} payload bytes); log is {} bytes, block {} offset {}",
        summary.records,
        summary.bytes,
        sink.len(),
        sink.len() / BLOCK_SIZE as u64,
        block_offset
    );
    println!(
        "records={} payload_bytes={} file_len={} block_offset={}",
        summary.records,
        summary.bytes,
        sink.len(),
        block_offset
    );

    Ok(())
}
