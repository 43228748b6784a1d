//! Error category classification.
//!
//! Groups chat failures by who can fix them, which drives retry affordances
//! and log labels.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connectivity lost while sending or reading the stream.
    /// Transient and retryable.
    Network,

    /// The backend rejected the request or reported a failure.
    Server,

    /// The client received something it could not interpret.
    Client,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient
    /// and the operation can be retried as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your connection and retry the message",
            ErrorCategory::Server => "The assistant may be unavailable. Please try again later",
            ErrorCategory::Client => "This may be a bug. Please report this issue if it persists",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
