//! Deck acquisition errors.

use thiserror::Error;

use super::category::ErrorCategory;
use super::service::ServiceError;
use super::store::StoreError;

/// Reasons a usable deck could not be produced.
///
/// Both variants end the process in the binary; `StoreUnusable` is the
/// unrecoverable case where wiping a corrupt store itself failed.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The service could not create a replacement deck.
    #[error("no deck available: {0}")]
    DeckUnavailable(#[from] ServiceError),

    /// The store was corrupt and could not be wiped.
    #[error("local deck store is unusable: {0}")]
    StoreUnusable(#[source] StoreError),
}

impl LifecycleError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            LifecycleError::DeckUnavailable(err) => err.category(),
            LifecycleError::StoreUnusable(_) => ErrorCategory::Corruption,
        }
    }

    /// True when retrying cannot help and the store must be abandoned.
    pub fn is_fatal(&self) -> bool {
        matches!(self, LifecycleError::StoreUnusable(_))
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            LifecycleError::DeckUnavailable(_) => {
                "Could not get a deck of cards from the deck service.".to_string()
            }
            LifecycleError::StoreUnusable(_) => {
                "The saved game is damaged and could not be cleared.".to_string()
            }
        }
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }
}
