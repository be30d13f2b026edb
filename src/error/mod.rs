//! Error handling for the cirrus core.
//!
//! Errors are split by domain and unified under a single crate-level type:
//!
//! - **`AuthError`** - login, refresh, and credential problems
//! - **`NetworkError`** - transport, timeout, and HTTP status problems
//! - **`CirrusError`** - the unified type returned at the crate surface
//! - **`CirrusResult<T>`** - result alias used throughout
//!
//! Every error carries two renderings: `Display` is the diagnostic form
//! (status codes, server bodies) intended for logs, and `user_message()` is
//! the short form intended for an end user ("check credentials"). Callers
//! decide retry policy themselves; nothing in the core retries.

mod auth;
mod category;
mod cirrus_error;
mod network;
mod result;

pub use auth::AuthError;
pub use category::ErrorCategory;
pub use cirrus_error::CirrusError;
pub use network::{classify_reqwest_error, NetworkError};
pub use result::CirrusResult;

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_error_unification() {
        let net: CirrusError = NetworkError::Timeout {
            operation: "fetch feed".to_string(),
            duration_secs: 30,
        }
        .into();
        let auth: CirrusError = AuthError::NotAuthenticated.into();
        let decode = CirrusError::Decode {
            message: "missing field `feed`".to_string(),
        };

        assert_eq!(net.category(), ErrorCategory::Network);
        assert_eq!(auth.category(), ErrorCategory::Auth);
        assert_eq!(decode.category(), ErrorCategory::Client);

        assert!(!net.user_message().is_empty());
        assert!(!auth.user_message().is_empty());
        assert!(!decode.user_message().is_empty());
    }

    #[test]
    fn test_retry_classification() {
        let retryable: Vec<CirrusError> = vec![
            NetworkError::Timeout {
                operation: "login".to_string(),
                duration_secs: 30,
            }
            .into(),
            NetworkError::ConnectionFailed {
                url: "https://example.invalid".to_string(),
                message: "refused".to_string(),
            }
            .into(),
        ];
        for err in retryable {
            assert!(err.is_retryable(), "expected {:?} to be retryable", err);
        }

        let not_retryable: Vec<CirrusError> = vec![
            AuthError::LoginFailed {
                status: 401,
                message: "bad credentials".to_string(),
            }
            .into(),
            CirrusError::Decode {
                message: "bad json".to_string(),
            },
        ];
        for err in not_retryable {
            assert!(!err.is_retryable(), "expected {:?} to not be retryable", err);
        }
    }

    #[test]
    fn test_reauth_detection() {
        let reauth: Vec<CirrusError> = vec![
            AuthError::NotAuthenticated.into(),
            AuthError::NoRefreshToken.into(),
            AuthError::RefreshFailed {
                status: 400,
                message: "expired".to_string(),
            }
            .into(),
        ];
        for err in reauth {
            assert!(err.requires_reauth(), "expected {:?} to require reauth", err);
        }

        let no_reauth: CirrusError = NetworkError::Timeout {
            operation: "fetch feed".to_string(),
            duration_secs: 30,
        }
        .into();
        assert!(!no_reauth.requires_reauth());
    }
}
