//! Network-related error types.
//!
//! Covers transport failures, timeouts, and non-2xx HTTP responses from
//! endpoints that are not part of the authentication contract.

use std::fmt;

/// Network-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// Connection to the server failed.
    ConnectionFailed { url: String, message: String },

    /// Request timed out.
    Timeout { operation: String, duration_secs: u64 },

    /// HTTP status error (non-2xx response).
    HttpStatus { status: u16, message: String },

    /// Generic network error.
    Other { message: String },
}

impl NetworkError {
    /// Check if this error is likely transient and worth retrying on a
    /// later cycle.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::ConnectionFailed { .. } => true,
            NetworkError::Timeout { .. } => true,
            NetworkError::HttpStatus { status, .. } => {
                *status >= 500 || *status == 429 || *status == 408
            }
            NetworkError::Other { .. } => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed { .. } => {
                "Could not reach the server. Check your connection.".to_string()
            }
            NetworkError::Timeout { .. } => {
                "The server took too long to respond. Try again.".to_string()
            }
            NetworkError::HttpStatus { status, .. } => match *status {
                429 => "Too many requests. Wait a moment and try again.".to_string(),
                s if s >= 500 => "The server is having trouble. Try again later.".to_string(),
                _ => "The request failed. Try again.".to_string(),
            },
            NetworkError::Other { .. } => "A network error occurred.".to_string(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "E_NET_CONNECT",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::HttpStatus { .. } => "E_NET_STATUS",
            NetworkError::Other { .. } => "E_NET_OTHER",
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ConnectionFailed { url, message } => {
                write!(f, "Connection to {} failed: {}", url, message)
            }
            NetworkError::Timeout {
                operation,
                duration_secs,
            } => {
                write!(f, "{} timed out after {}s", operation, duration_secs)
            }
            NetworkError::HttpStatus { status, message } => {
                write!(f, "HTTP {}: {}", status, message)
            }
            NetworkError::Other { message } => {
                write!(f, "Network error: {}", message)
            }
        }
    }
}

impl std::error::Error for NetworkError {}

/// Classify a reqwest error into a [`NetworkError`].
///
/// `operation` names the call for log context ("login", "fetch feed").
pub fn classify_reqwest_error(err: &reqwest::Error, operation: &str) -> NetworkError {
    if err.is_timeout() {
        NetworkError::Timeout {
            operation: operation.to_string(),
            duration_secs: crate::api::REQUEST_TIMEOUT_SECS,
        }
    } else if err.is_connect() {
        NetworkError::ConnectionFailed {
            url: err
                .url()
                .map(|u| u.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
            message: err.to_string(),
        }
    } else {
        NetworkError::Other {
            message: format!("{}: {}", operation, err),
        }
    }
}
