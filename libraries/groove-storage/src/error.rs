/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backing store cannot be reached at all (e.g. storage disabled)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// The backing store rejected an operation
    #[error(transparent)]
    Store(#[from] groove_core::CoreError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for groove_core::CoreError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Store(inner) => inner,
            other => groove_core::CoreError::storage(other.to_string()),
        }
    }
}
