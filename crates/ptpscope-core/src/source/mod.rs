//! Trace ingestion: hex strings and raw binary files.
//!
//! All file access for the core lives here; decoding layers only ever see
//! byte slices.

use std::fs;
use std::path::Path;

use thiserror::Error;

mod hex;

pub use hex::parse_hex_trace;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex digit '{ch}' at position {pos}")]
    InvalidHexDigit { ch: char, pos: usize },
    #[error("odd number of hex digits ({count})")]
    OddDigitCount { count: usize },
}

/// Read a raw trace capture from disk.
pub fn read_trace_file(path: &Path) -> Result<Vec<u8>, SourceError> {
    Ok(fs::read(path)?)
}
