//! Centralized error types for mailtrace.
//!
//! Header *content* is never an error: malformed input degrades to partial
//! results inside the parser layer. These variants cover the host boundary
//! only (reading input files, loading configuration).

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the mailtrace library.
#[derive(Error, Debug)]
pub enum TraceError {
    /// I/O error with the associated file path.
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The specified input file does not exist.
    #[error("Header file not found: {0}")]
    FileNotFound(PathBuf),

    /// The configuration file exists but could not be parsed.
    #[error("Invalid configuration in '{path}': {reason}")]
    InvalidConfig { path: PathBuf, reason: String },
}

/// Convenience alias for `Result<T, TraceError>`.
pub type Result<T> = std::result::Result<T, TraceError>;

impl TraceError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Allow `?` on `std::io::Error` inside functions returning `TraceError`
/// when no path context is available (rare — prefer `TraceError::io`).
impl From<std::io::Error> for TraceError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            path: PathBuf::from("<unknown>"),
            source,
        }
    }
}
