//! Authentication-related error types.
//!
//! Covers the session lifecycle: login, refresh, token acquisition, and
//! credential storage.

use std::fmt;

/// Authentication-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    /// The session-creation endpoint rejected the credentials (non-2xx).
    LoginFailed { status: u16, message: String },

    /// The session-refresh endpoint rejected the refresh token (non-2xx).
    RefreshFailed { status: u16, message: String },

    /// A refresh was attempted with no refresh token in the store.
    NoRefreshToken,

    /// No usable access token exists in memory or in the store.
    NotAuthenticated,
}

impl AuthError {
    /// Check if this error is resolved by signing in again.
    pub fn requires_reauth(&self) -> bool {
        match self {
            AuthError::LoginFailed { .. } => false,
            AuthError::RefreshFailed { .. }
            | AuthError::NoRefreshToken
            | AuthError::NotAuthenticated => true,
        }
    }

    /// Get a user-friendly error message.
    ///
    /// The server's status and body stay out of this string; they are in
    /// `Display` for the logs.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::LoginFailed { .. } => {
                "Sign-in failed. Please check your credentials.".to_string()
            }
            AuthError::RefreshFailed { .. } => {
                "Your session could not be renewed. Please sign in again.".to_string()
            }
            AuthError::NoRefreshToken => {
                "Your session has ended. Please sign in again.".to_string()
            }
            AuthError::NotAuthenticated => {
                "You are not signed in. Please sign in to continue.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::LoginFailed { .. } => "E_AUTH_LOGIN",
            AuthError::RefreshFailed { .. } => "E_AUTH_REFRESH",
            AuthError::NoRefreshToken => "E_AUTH_NO_REFRESH",
            AuthError::NotAuthenticated => "E_AUTH_NOT_AUTH",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::LoginFailed { status, message } => {
                write!(f, "Login failed ({}): {}", status, message)
            }
            AuthError::RefreshFailed { status, message } => {
                write!(f, "Session refresh failed ({}): {}", status, message)
            }
            AuthError::NoRefreshToken => {
                write!(f, "No refresh token available")
            }
            AuthError::NotAuthenticated => {
                write!(f, "Not authenticated")
            }
        }
    }
}

impl std::error::Error for AuthError {}
