//! Error taxonomy for lexi-core.
//!
//! Every fallible operation returns [`Result`]. Callers at an action boundary
//! (a button press, a CLI subcommand) collapse the error with
//! [`Error::kind`] and report it; nothing here is fatal to the process.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the store, preference container and export utility.
#[derive(Error, Debug)]
pub enum Error {
    /// The target location is not mounted or not writable, or the database
    /// file could not be created there.
    #[error("storage unavailable: {}", .0.display())]
    StorageUnavailable(PathBuf),

    /// A copy was attempted before its source file was ever written.
    #[error("source file missing: {}", .0.display())]
    SourceMissing(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("preference encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Coarse classification used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    StorageUnavailable,
    SourceMissing,
    IoFailure,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::StorageUnavailable(_) => ErrorKind::StorageUnavailable,
            Error::SourceMissing(_) => ErrorKind::SourceMissing,
            Error::Io(_) | Error::Database(_) | Error::Json(_) | Error::Config(_) => {
                ErrorKind::IoFailure
            }
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::StorageUnavailable => write!(f, "storage_unavailable"),
            ErrorKind::SourceMissing => write!(f, "source_missing"),
            ErrorKind::IoFailure => write!(f, "io_failure"),
        }
    }
}

/// Result type alias for lexi-core operations.
pub type Result<T> = std::result::Result<T, Error>;
