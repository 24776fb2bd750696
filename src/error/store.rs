//! Local store errors.

use std::path::PathBuf;

use thiserror::Error;

use super::category::ErrorCategory;

/// Failure reading, writing or wiping the local deck store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem operation failed.
    #[error("failed to {operation} '{}': {source}", path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The in-memory records could not be encoded.
    #[error("failed to encode deck store: {0}")]
    Encode(#[source] serde_json::Error),

    /// Stored records could not be decoded or are invalid.
    #[error("deck store is corrupt: {message}")]
    Corrupt { message: String },

    /// No location to keep the store in.
    #[error("could not determine a data directory")]
    NoDataDirectory,

    /// Backend refused the operation.
    #[error("deck store unavailable: {message}")]
    Unavailable { message: String },
}

impl StoreError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            StoreError::Corrupt { .. } => ErrorCategory::Corruption,
            _ => ErrorCategory::Persistence,
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::Io { .. } => "E_STORE_IO",
            StoreError::Encode(_) => "E_STORE_ENCODE",
            StoreError::Corrupt { .. } => "E_STORE_CORRUPT",
            StoreError::NoDataDirectory => "E_STORE_NO_DIR",
            StoreError::Unavailable { .. } => "E_STORE_UNAVAILABLE",
        }
    }
}
