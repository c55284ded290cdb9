//! Error types for the wallet state store.
//!
//! All error types implement `std::error::Error` so they compose with
//! `?` and boxed errors in callers.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Main error type for store operations.
///
/// Absence of a record is never an error: `get` returns the default record.
#[derive(Debug)]
pub enum StoreError {
    /// The caller passed a value that would break the record invariant.
    InvalidArgument(String),
    /// The storage medium could not be read or written, or held bytes
    /// that do not decode to a valid record.
    StorageUnavailable {
        /// File (or directory) the failing operation touched.
        path: PathBuf,
        /// Underlying I/O error. Decode failures use `ErrorKind::InvalidData`.
        source: io::Error,
    },
}

impl StoreError {
    pub(crate) fn storage(path: &Path, source: io::Error) -> Self {
        StoreError::StorageUnavailable {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn corrupt(path: &Path, msg: impl Into<String>) -> Self {
        Self::storage(path, io::Error::new(io::ErrorKind::InvalidData, msg.into()))
    }

    /// Whether this error was caused by the caller rather than the medium.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, StoreError::InvalidArgument(_))
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            StoreError::StorageUnavailable { path, source } => {
                write!(f, "storage unavailable at {}: {}", path.display(), source)
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StoreError::StorageUnavailable { source, .. } => Some(source),
            StoreError::InvalidArgument(_) => None,
        }
    }
}
