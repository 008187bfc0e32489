//! Error types for the record store.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or saving the store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading, writing or renaming a file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The store file exists but is not a readable store
    #[error("record store at {path} is corrupt: {source}")]
    Corrupt {
        /// Store file
        path: PathBuf,
        /// Parse failure
        #[source]
        source: serde_json::Error,
    },

    /// Serializing the store or summary failed
    #[error("failed to serialize: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
