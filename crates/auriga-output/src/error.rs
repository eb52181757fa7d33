//! Error types for the persistence layer.

use std::fmt;
use std::io;

/// Errors from writing or reading candidate dumps.
///
/// Malformed input is always a hard failure surfaced to the caller; the
/// reader never skips a bad line or returns a partial record.
#[derive(Debug)]
pub enum PersistError {
    /// An I/O error from the underlying stream.
    Io(io::Error),
    /// A record line could not be parsed.
    Malformed {
        /// 1-based line number in the input.
        line: u64,
        /// Human-readable description of what went wrong.
        reason: String,
    },
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Malformed { line, reason } => {
                write!(f, "malformed record at line {line}: {reason}")
            }
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Malformed { .. } => None,
        }
    }
}

impl From<io::Error> for PersistError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
