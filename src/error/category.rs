//! Error category classification.
//!
//! Categories decide how a failure is handled: transport and service
//! failures degrade to a skipped attempt, persistence failures are retried
//! on the next mutation, corruption is self-healed when possible.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network unreachable, connection refused, timeout.
    Transport,

    /// Non-success status or a body that does not match the expected shape.
    Service,

    /// Local store read/write failure.
    Persistence,

    /// Unexpected or undecodable records in the local store.
    Corruption,
}

impl ErrorCategory {
    /// Returns true if the operation can simply be attempted again later.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorCategory::Transport | ErrorCategory::Service | ErrorCategory::Persistence
        )
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Transport => "transport",
            ErrorCategory::Service => "service",
            ErrorCategory::Persistence => "persistence",
            ErrorCategory::Corruption => "corruption",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Transport => "Check your internet connection and try again",
            ErrorCategory::Service => {
                "The deck service may be having issues. Please try again later"
            }
            ErrorCategory::Persistence => "Check file permissions and available disk space",
            ErrorCategory::Corruption => "Run with --reset to clear the saved game",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_retryable() {
        assert!(ErrorCategory::Transport.is_retryable());
        assert!(ErrorCategory::Service.is_retryable());
        assert!(ErrorCategory::Persistence.is_retryable());
        assert!(!ErrorCategory::Corruption.is_retryable());
    }

    #[test]
    fn test_category_as_str() {
        assert_eq!(ErrorCategory::Transport.as_str(), "transport");
        assert_eq!(ErrorCategory::Service.as_str(), "service");
        assert_eq!(ErrorCategory::Persistence.as_str(), "persistence");
        assert_eq!(ErrorCategory::Corruption.as_str(), "corruption");
    }

    #[test]
    fn test_category_display() {
        assert_eq!(format!("{}", ErrorCategory::Transport), "transport");
    }

    #[test]
    fn test_category_recovery_hint() {
        assert!(ErrorCategory::Transport.recovery_hint().contains("internet"));
        assert!(ErrorCategory::Corruption.recovery_hint().contains("--reset"));
    }
}
