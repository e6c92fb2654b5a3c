//! Best-score record format
//!
//! The record is the bare score: 8 bytes, little-endian, no header and no
//! version. Anything else on disk is treated as corrupt.

use std::fmt;
use std::io;

/// Size of the record in bytes
pub const RECORD_LEN: usize = 8;

/// Errors from reading or writing the best score
#[derive(Debug)]
pub enum StoreError {
    /// Underlying storage failed
    Io(io::Error),
    /// Record has the wrong size
    BadLength(usize),
    /// Record text is not a number (LocalStorage)
    BadValue(String),
    /// Storage backend is not available on this platform
    Unavailable,
}

impl StoreError {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::BadLength(_) => "bad_length",
            Self::BadValue(_) => "bad_value",
            Self::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "storage error: {err}"),
            Self::BadLength(len) => {
                write!(f, "score record is {len} bytes, expected {RECORD_LEN}")
            }
            Self::BadValue(text) => write!(f, "score record {text:?} is not a number"),
            Self::Unavailable => write!(f, "score storage is unavailable"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Encode a score as its on-disk record
#[inline]
pub fn encode_record(score: u64) -> [u8; RECORD_LEN] {
    score.to_le_bytes()
}

/// Decode an on-disk record
pub fn decode_record(bytes: &[u8]) -> Result<u64, StoreError> {
    let raw: [u8; RECORD_LEN] = bytes
        .try_into()
        .map_err(|_| StoreError::BadLength(bytes.len()))?;
    Ok(u64::from_le_bytes(raw))
}
