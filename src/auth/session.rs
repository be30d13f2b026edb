//! Session lifecycle management.
//!
//! [`SessionManager`] owns the in-memory access token and guarantees that
//! every authenticated call can get a non-expired token, refreshing or
//! rehydrating from the credential store as needed. It is the sole writer
//! of session state; construct one per process and share it behind an
//! `Arc`.

use std::sync::{Arc, RwLock};

use tracing::{debug, info, warn};

use super::jwt;
use crate::api::ApiClient;
use crate::error::{AuthError, CirrusResult};
use crate::models::SessionResponse;
use crate::traits::CredentialStore;

/// An authenticated session: the token pair returned by login or refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Access token authorizing API calls.
    pub access_token: String,
    /// Refresh token for renewing the session, when the server issued one.
    pub refresh_token: Option<String>,
}

/// Owns the access/refresh token pair and the exchanges that renew it.
pub struct SessionManager {
    api: Arc<ApiClient>,
    store: Arc<dyn CredentialStore>,
    access_token: RwLock<Option<String>>,
}

impl SessionManager {
    /// Create a session manager over an API client and a credential store.
    pub fn new(api: Arc<ApiClient>, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            api,
            store,
            access_token: RwLock::new(None),
        }
    }

    /// The in-memory access token, if one is held.
    pub fn access_token(&self) -> Option<String> {
        self.access_token.read().expect("token lock poisoned").clone()
    }

    /// Log in with an identifier and secret.
    ///
    /// On success the returned pair is persisted to the credential store
    /// and adopted as the current session.
    pub async fn login(&self, identifier: &str, secret: &str) -> CirrusResult<Session> {
        let response = self.api.create_session(identifier, secret).await?;
        info!("login succeeded");
        Ok(self.adopt(response).await)
    }

    /// Exchange the stored refresh token for a new session.
    ///
    /// Fails with [`AuthError::NoRefreshToken`] when the store holds no
    /// refresh token, and [`AuthError::RefreshFailed`] when the server
    /// rejects the exchange; the caller falls back to a fresh login.
    pub async fn refresh_session(&self) -> CirrusResult<Session> {
        let Some(refresh) = self.store.load_refresh().await? else {
            return Err(AuthError::NoRefreshToken.into());
        };

        let response = self.api.refresh_session(&refresh).await?;
        info!("session refreshed");
        Ok(self.adopt(response).await)
    }

    /// Get a non-expired access token, refreshing transparently if needed.
    ///
    /// Resolution order: in-memory token, then the credential store. A
    /// token that is expired or cannot be decoded triggers a refresh; the
    /// refreshed token is adopted and returned. With no token anywhere,
    /// fails with [`AuthError::NotAuthenticated`].
    pub async fn ensure_valid_token(&self) -> CirrusResult<String> {
        let mut token = self.access_token();

        if token.is_none() {
            match self.store.load_access().await {
                Ok(Some(stored)) => {
                    debug!("rehydrated access token from credential store");
                    *self.access_token.write().expect("token lock poisoned") =
                        Some(stored.clone());
                    token = Some(stored);
                }
                Ok(None) => {}
                Err(e) => warn!(error = %e, "credential store read failed"),
            }
        }

        match token {
            Some(t) if !jwt::is_token_expired(&t) => Ok(t),
            Some(_) => {
                debug!("access token expired or undecodable, refreshing");
                let session = self.refresh_session().await?;
                Ok(session.access_token)
            }
            None => Err(AuthError::NotAuthenticated.into()),
        }
    }

    /// Clear the in-memory session and delete stored credentials.
    ///
    /// Idempotent and infallible; storage failures are logged, not
    /// returned.
    pub async fn logout(&self) {
        *self.access_token.write().expect("token lock poisoned") = None;
        if let Err(e) = self.store.delete_all().await {
            warn!(error = %e, "failed to clear credential store on logout");
        }
        info!("logged out");
    }

    /// Persist a token pair and adopt it as the current session.
    ///
    /// A store write failure downgrades to a warning: the in-memory
    /// session is valid either way, it just won't survive a restart.
    async fn adopt(&self, response: SessionResponse) -> Session {
        if let Err(e) = self
            .store
            .save(&response.access_token, response.refresh_token.as_deref())
            .await
        {
            warn!(error = %e, "failed to persist credentials; session kept in memory only");
        }

        *self.access_token.write().expect("token lock poisoned") =
            Some(response.access_token.clone());

        Session {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryCredentialStore;
    use crate::traits::CredentialStore as _;
    use base64::{engine::general_purpose::STANDARD, Engine};

    fn make_token(exp: i64) -> String {
        let header = STANDARD.encode(r#"{"alg":"HS256"}"#);
        let payload = STANDARD.encode(format!(r#"{{"exp":{}}}"#, exp));
        format!("{}.{}.sig", header, payload)
    }

    fn unreachable_manager(store: Arc<MemoryCredentialStore>) -> SessionManager {
        // Port 1 is never listening; any request through this client fails.
        let api = Arc::new(ApiClient::with_base_url("http://127.0.0.1:1".to_string()));
        SessionManager::new(api, store)
    }

    #[tokio::test]
    async fn test_ensure_valid_token_without_any_token() {
        let store = Arc::new(MemoryCredentialStore::new());
        let manager = unreachable_manager(store);

        let err = manager.ensure_valid_token().await.unwrap_err();
        assert_eq!(err, AuthError::NotAuthenticated.into());
    }

    #[tokio::test]
    async fn test_ensure_valid_token_rehydrates_from_store() {
        let store = Arc::new(MemoryCredentialStore::new());
        let token = make_token(chrono::Utc::now().timestamp() + 3600);
        store.save(&token, None).await.unwrap();

        let manager = unreachable_manager(store);
        assert!(manager.access_token().is_none());

        let resolved = manager.ensure_valid_token().await.unwrap();
        assert_eq!(resolved, token);
        assert_eq!(manager.access_token(), Some(token));
    }

    #[tokio::test]
    async fn test_refresh_without_refresh_token() {
        let store = Arc::new(MemoryCredentialStore::new());
        let manager = unreachable_manager(store);

        let err = manager.refresh_session().await.unwrap_err();
        assert_eq!(err, AuthError::NoRefreshToken.into());
    }

    #[tokio::test]
    async fn test_expired_token_without_refresh_token() {
        // Expired token in the store, nothing to refresh with.
        let store = Arc::new(MemoryCredentialStore::new());
        store.save(&make_token(0), None).await.unwrap();

        let manager = unreachable_manager(store);
        let err = manager.ensure_valid_token().await.unwrap_err();
        assert_eq!(err, AuthError::NoRefreshToken.into());
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let store = Arc::new(MemoryCredentialStore::new());
        store.save("some-token", Some("some-refresh")).await.unwrap();

        let manager = unreachable_manager(store.clone());
        manager.logout().await;
        assert!(manager.access_token().is_none());
        assert!(store.load_access().await.unwrap().is_none());
        assert!(store.load_refresh().await.unwrap().is_none());

        // Second logout is a no-op that still succeeds.
        manager.logout().await;
        assert!(store.load_access().await.unwrap().is_none());
    }
}
