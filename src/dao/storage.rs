use std::path::PathBuf;

use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by team store backends regardless of the underlying medium.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("failed to access team data at `{}`", path.display())]
    Io {
        /// File that was being accessed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The in-memory store could not be serialized.
    #[error("failed to encode team data")]
    Encode {
        /// Serializer failure.
        #[source]
        source: serde_json::Error,
    },
    /// The persisted payload is not a valid team data container.
    #[error("failed to decode team data at `{}`", path.display())]
    Decode {
        /// Location of the rejected payload.
        path: PathBuf,
        /// Parser failure.
        #[source]
        source: serde_json::Error,
    },
    /// The container was written by a newer format revision.
    #[error("unsupported team data version {found}")]
    UnsupportedVersion {
        /// Version stamp found in the payload.
        found: u32,
    },
}

impl StorageError {
    /// Wrap an I/O failure for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}
