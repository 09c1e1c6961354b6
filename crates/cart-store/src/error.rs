//! Error types for cart persistence

use std::io;
use std::path::PathBuf;

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("storage I/O failed at {}: {source}", path.display())]
    Io {
        /// Backing file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Backing file is not a JSON object of string values
    #[error("storage file {} is corrupt: {source}", path.display())]
    Corrupt {
        /// Backing file
        path: PathBuf,
        /// Parse error
        #[source]
        source: serde_json::Error,
    },

    /// Cart could not be serialized
    #[error("failed to serialize cart: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    /// Create I/O error for path
    #[inline]
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
