//! High-level error classification.

use std::fmt;

/// High-level category of an error, used for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Connectivity, timeouts, server status problems.
    Network,
    /// Authentication and session lifecycle problems.
    Auth,
    /// Malformed data or programming errors; not retryable.
    Client,
    /// Local storage (credential file) problems.
    System,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Network => write!(f, "network"),
            ErrorCategory::Auth => write!(f, "auth"),
            ErrorCategory::Client => write!(f, "client"),
            ErrorCategory::System => write!(f, "system"),
        }
    }
}
