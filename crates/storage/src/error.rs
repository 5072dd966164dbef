//! Error types for the favorites storage system.

use thiserror::Error;

/// Errors that can occur during favorites storage operations.
#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error("favorites data is corrupt")]
    Corrupt {
        #[source]
        source: Option<eyre::Report>,
    },

    #[error("storage operation failed: {operation}")]
    StorageOperationFailed {
        operation: String,
        #[source]
        source: Option<eyre::Report>,
    },

    #[error("storage backend error")]
    BackendError {
        #[source]
        source: Option<eyre::Report>,
    },
}

/// Result type alias for favorites storage operations.
pub type Result<T> = std::result::Result<T, FavoritesError>;
