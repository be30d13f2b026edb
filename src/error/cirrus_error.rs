//! Unified crate-level error type.

use std::fmt;

use super::{AuthError, ErrorCategory, NetworkError};
use crate::traits::CredentialsError;

/// Unified error type for all core operations.
///
/// Wraps the domain-specific errors so callers can match on one type at the
/// crate surface while still reaching the underlying variant.
#[derive(Debug, Clone, PartialEq)]
pub enum CirrusError {
    /// Session lifecycle failure.
    Auth(AuthError),
    /// Transport or HTTP failure.
    Network(NetworkError),
    /// Response body could not be decoded.
    Decode { message: String },
    /// Credential storage failure.
    Store(CredentialsError),
}

impl CirrusError {
    /// High-level category for handling decisions.
    pub fn category(&self) -> ErrorCategory {
        match self {
            CirrusError::Auth(_) => ErrorCategory::Auth,
            CirrusError::Network(_) => ErrorCategory::Network,
            CirrusError::Decode { .. } => ErrorCategory::Client,
            CirrusError::Store(_) => ErrorCategory::System,
        }
    }

    /// Check if the operation is worth repeating on a later cycle.
    pub fn is_retryable(&self) -> bool {
        match self {
            CirrusError::Auth(_) => false,
            CirrusError::Network(e) => e.is_retryable(),
            CirrusError::Decode { .. } => false,
            CirrusError::Store(_) => false,
        }
    }

    /// Check if this error is resolved by signing in again.
    pub fn requires_reauth(&self) -> bool {
        match self {
            CirrusError::Auth(e) => e.requires_reauth(),
            _ => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            CirrusError::Auth(e) => e.user_message(),
            CirrusError::Network(e) => e.user_message(),
            CirrusError::Decode { .. } => {
                "The server sent an unexpected response.".to_string()
            }
            CirrusError::Store(_) => {
                "Could not access stored credentials.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            CirrusError::Auth(e) => e.error_code(),
            CirrusError::Network(e) => e.error_code(),
            CirrusError::Decode { .. } => "E_DECODE",
            CirrusError::Store(_) => "E_STORE",
        }
    }
}

impl fmt::Display for CirrusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CirrusError::Auth(e) => write!(f, "{}", e),
            CirrusError::Network(e) => write!(f, "{}", e),
            CirrusError::Decode { message } => write!(f, "Decode error: {}", message),
            CirrusError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CirrusError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CirrusError::Auth(e) => Some(e),
            CirrusError::Network(e) => Some(e),
            CirrusError::Decode { .. } => None,
            CirrusError::Store(e) => Some(e),
        }
    }
}

impl From<AuthError> for CirrusError {
    fn from(e: AuthError) -> Self {
        CirrusError::Auth(e)
    }
}

impl From<NetworkError> for CirrusError {
    fn from(e: NetworkError) -> Self {
        CirrusError::Network(e)
    }
}

impl From<CredentialsError> for CirrusError {
    fn from(e: CredentialsError) -> Self {
        CirrusError::Store(e)
    }
}

impl From<serde_json::Error> for CirrusError {
    fn from(e: serde_json::Error) -> Self {
        CirrusError::Decode {
            message: e.to_string(),
        }
    }
}
