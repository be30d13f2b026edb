//! Credential store trait abstraction.
//!
//! Durable storage for the access/refresh token pair. The session manager
//! is the only caller; everything it knows about persistence goes through
//! this trait.

use async_trait::async_trait;
use thiserror::Error;

/// Credential storage errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CredentialsError {
    /// Failed to load credentials.
    #[error("Failed to load credentials: {0}")]
    LoadFailed(String),

    /// Failed to save credentials.
    #[error("Failed to save credentials: {0}")]
    SaveFailed(String),

    /// Failed to delete credentials.
    #[error("Failed to delete credentials: {0}")]
    DeleteFailed(String),

    /// Other storage error.
    #[error("Credentials error: {0}")]
    Other(String),
}

/// Trait for durable access/refresh token storage.
///
/// Implementations must be forgiving on the read path: a missing record is
/// `Ok(None)`, not an error. `delete_all` is idempotent.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Persist the token pair, replacing any previous record.
    async fn save(&self, access: &str, refresh: Option<&str>) -> Result<(), CredentialsError>;

    /// Load the stored access token, if any.
    async fn load_access(&self) -> Result<Option<String>, CredentialsError>;

    /// Load the stored refresh token, if any.
    async fn load_refresh(&self) -> Result<Option<String>, CredentialsError>;

    /// Delete every stored record. Succeeds when nothing is stored.
    async fn delete_all(&self) -> Result<(), CredentialsError>;
}
