//! Deck service errors.
//!
//! Every remote operation can fail because of the transport, a non-2xx
//! status, or a body that does not match the expected shape. Callers only
//! ever treat these as "operation failed"; the variants exist for logging.
//! The one exception is [`ServiceError::Exhausted`], which tells the caller
//! the remote deck is empty.

use thiserror::Error;

use super::category::ErrorCategory;
use crate::traits::HttpError;

/// Failure of a single deck service operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The request never produced a response.
    #[error("{operation}: could not reach the deck service: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },

    /// The service answered with a non-success status.
    #[error("{operation}: deck service returned HTTP {status}")]
    Status { operation: &'static str, status: u16 },

    /// The body was missing fields, mistyped, or reported `success: false`.
    #[error("{operation}: malformed response: {message}")]
    Malformed {
        operation: &'static str,
        message: String,
    },

    /// The service refused a draw because the deck has no cards left.
    #[error("{operation}: deck has no cards left")]
    Exhausted { operation: &'static str },
}

impl ServiceError {
    /// Classify an HTTP client error for `operation`.
    pub fn from_http(operation: &'static str, err: HttpError) -> Self {
        match err {
            HttpError::ServerError { status, .. } => ServiceError::Status { operation, status },
            other => ServiceError::Transport {
                operation,
                message: other.to_string(),
            },
        }
    }

    /// Build a malformed-body error.
    pub fn malformed(operation: &'static str, message: impl Into<String>) -> Self {
        ServiceError::Malformed {
            operation,
            message: message.into(),
        }
    }

    /// The operation that failed.
    pub fn operation(&self) -> &'static str {
        match self {
            ServiceError::Transport { operation, .. }
            | ServiceError::Status { operation, .. }
            | ServiceError::Malformed { operation, .. }
            | ServiceError::Exhausted { operation } => operation,
        }
    }

    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ServiceError::Transport { .. } => ErrorCategory::Transport,
            ServiceError::Status { .. }
            | ServiceError::Malformed { .. }
            | ServiceError::Exhausted { .. } => ErrorCategory::Service,
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::Transport { .. } => "E_SVC_TRANSPORT",
            ServiceError::Status { .. } => "E_SVC_STATUS",
            ServiceError::Malformed { .. } => "E_SVC_MALFORMED",
            ServiceError::Exhausted { .. } => "E_SVC_EXHAUSTED",
        }
    }
}
