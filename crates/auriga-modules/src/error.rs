//! Module construction errors.

use std::fmt;
use std::io;

/// Errors from module construction.
///
/// Raised immediately at build time, before any candidate is processed;
/// a module that constructed successfully does not fail at runtime
/// (spurious conditions are counted, not propagated).
#[derive(Debug)]
pub enum ConfigError {
    /// The builder was not given an output sink.
    MissingSink,
    /// Compressed output was requested but this build has no compression
    /// support (the `gzip` cargo feature is disabled).
    CompressionUnavailable,
    /// An I/O error while opening or preparing the output sink.
    Io(io::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSink => write!(f, "an output sink (file or stream) is required"),
            Self::CompressionUnavailable => {
                write!(
                    f,
                    "compressed output requested but built without the 'gzip' feature"
                )
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
