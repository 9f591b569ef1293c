//! Cache error types.

use thiserror::Error;

/// Errors that can occur when using the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to open the store.
    #[error("Failed to open store: {0}")]
    OpenError(String),

    /// Failed to (de)serialize a value.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// A backend operation failed.
    #[error("Store operation failed: {0}")]
    StoreError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
