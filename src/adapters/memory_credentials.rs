//! In-memory credential store for testing.
//!
//! Stores the token pair in memory so tests can exercise code that depends
//! on [`CredentialStore`] without touching the file system. Failure
//! injection toggles let tests drive the storage error paths.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::auth::Credentials;
use crate::traits::{CredentialStore, CredentialsError};

/// In-memory credential store.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    credentials: Arc<Mutex<Option<Credentials>>>,
    save_should_fail: Arc<Mutex<bool>>,
    load_should_fail: Arc<Mutex<bool>>,
}

impl MemoryCredentialStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with a token pair.
    pub fn with_tokens(access: &str, refresh: Option<&str>) -> Self {
        let store = Self::new();
        *store.credentials.lock().unwrap() = Some(Credentials {
            access_token: Some(access.to_string()),
            refresh_token: refresh.map(String::from),
        });
        store
    }

    /// Make subsequent `save` calls fail.
    pub fn fail_saves(&self, fail: bool) {
        *self.save_should_fail.lock().unwrap() = fail;
    }

    /// Make subsequent `load_*` calls fail.
    pub fn fail_loads(&self, fail: bool) {
        *self.load_should_fail.lock().unwrap() = fail;
    }

    fn snapshot(&self) -> Result<Option<Credentials>, CredentialsError> {
        if *self.load_should_fail.lock().unwrap() {
            return Err(CredentialsError::LoadFailed("injected failure".to_string()));
        }
        Ok(self.credentials.lock().unwrap().clone())
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn save(&self, access: &str, refresh: Option<&str>) -> Result<(), CredentialsError> {
        if *self.save_should_fail.lock().unwrap() {
            return Err(CredentialsError::SaveFailed("injected failure".to_string()));
        }
        *self.credentials.lock().unwrap() = Some(Credentials {
            access_token: Some(access.to_string()),
            refresh_token: refresh.map(String::from),
        });
        Ok(())
    }

    async fn load_access(&self) -> Result<Option<String>, CredentialsError> {
        Ok(self.snapshot()?.and_then(|c| c.access_token))
    }

    async fn load_refresh(&self) -> Result<Option<String>, CredentialsError> {
        Ok(self.snapshot()?.and_then(|c| c.refresh_token))
    }

    async fn delete_all(&self) -> Result<(), CredentialsError> {
        *self.credentials.lock().unwrap() = None;
        Ok(())
    }
}
