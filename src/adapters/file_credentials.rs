//! File-based credential store adapter.
//!
//! Wraps [`CredentialsManager`] and implements the [`CredentialStore`]
//! trait, giving the session manager durable storage at
//! `~/.cirrus/.credentials.json`.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::auth::credentials::{Credentials, CredentialsManager};
use crate::traits::{CredentialStore, CredentialsError};

/// File-backed credential store.
#[derive(Debug)]
pub struct FileCredentialStore {
    manager: CredentialsManager,
}

impl FileCredentialStore {
    /// Create a store rooted at the user's home directory.
    ///
    /// Fails if the home directory cannot be determined.
    pub fn new() -> Result<Self, CredentialsError> {
        CredentialsManager::new()
            .map(|manager| Self { manager })
            .ok_or_else(|| {
                CredentialsError::Other("Failed to determine home directory".to_string())
            })
    }

    /// Create a store over an explicit file path.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            manager: CredentialsManager::with_path(path),
        }
    }

    /// The path to the credentials file.
    pub fn credentials_path(&self) -> &PathBuf {
        self.manager.credentials_path()
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn save(&self, access: &str, refresh: Option<&str>) -> Result<(), CredentialsError> {
        let creds = Credentials {
            access_token: Some(access.to_string()),
            refresh_token: refresh.map(String::from),
        };
        if self.manager.save(&creds) {
            Ok(())
        } else {
            Err(CredentialsError::SaveFailed(
                "Failed to write credentials file".to_string(),
            ))
        }
    }

    async fn load_access(&self) -> Result<Option<String>, CredentialsError> {
        Ok(self.manager.load().access_token)
    }

    async fn load_refresh(&self) -> Result<Option<String>, CredentialsError> {
        Ok(self.manager.load().refresh_token)
    }

    async fn delete_all(&self) -> Result<(), CredentialsError> {
        if self.manager.clear() {
            Ok(())
        } else {
            Err(CredentialsError::DeleteFailed(
                "Failed to delete credentials file".to_string(),
            ))
        }
    }
}
