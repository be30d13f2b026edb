//! Remote API gateway client.
//!
//! This module provides the HTTP client for the three endpoints the core
//! consumes: session creation, session refresh, and the feed. It owns the
//! base URL and the request timeout; the session manager and the feed
//! synchronizer drive it.

use std::time::Duration;

use reqwest::Client;
use tracing::warn;

use crate::error::{classify_reqwest_error, AuthError, CirrusResult, NetworkError};
use crate::models::{SessionResponse, TimelineResponse};

/// Default URL for the remote service.
pub const DEFAULT_SERVICE_URL: &str = "https://bsky.social";

/// Timeout applied to every request, in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client for the remote feed service.
pub struct ApiClient {
    /// Base URL for the service.
    pub base_url: String,
    /// Reusable HTTP client.
    client: Client,
}

impl ApiClient {
    /// Create a new client with the default base URL.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_SERVICE_URL.to_string())
    }

    /// Create a new client with a custom base URL.
    pub fn with_base_url(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");
        Self { base_url, client }
    }

    /// Create a session from an identifier and secret.
    ///
    /// POST /session
    ///
    /// Any non-2xx status is an authentication failure; the status and
    /// body travel on the error for the logs.
    pub async fn create_session(
        &self,
        identifier: &str,
        secret: &str,
    ) -> CirrusResult<SessionResponse> {
        let url = format!("{}/session", self.base_url);

        let body = serde_json::json!({
            "identifier": identifier,
            "secret": secret,
        });

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e, "login"))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(status, body = %message, "login rejected by server");
            return Err(AuthError::LoginFailed { status, message }.into());
        }

        let text = response
            .text()
            .await
            .map_err(|e| classify_reqwest_error(&e, "login"))?;
        let session: SessionResponse = serde_json::from_str(&text)?;
        Ok(session)
    }

    /// Exchange a refresh token for a new session.
    ///
    /// POST /session/refresh
    pub async fn refresh_session(&self, refresh_token: &str) -> CirrusResult<SessionResponse> {
        let url = format!("{}/session/refresh", self.base_url);

        let body = serde_json::json!({
            "refreshToken": refresh_token,
        });

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e, "refresh session"))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(status, body = %message, "session refresh rejected by server");
            return Err(AuthError::RefreshFailed { status, message }.into());
        }

        let text = response
            .text()
            .await
            .map_err(|e| classify_reqwest_error(&e, "refresh session"))?;
        let session: SessionResponse = serde_json::from_str(&text)?;
        Ok(session)
    }

    /// Fetch one page of the feed.
    ///
    /// GET /feed?limit=N[&cursor=C], authenticated with a bearer token.
    pub async fn fetch_timeline(
        &self,
        token: &str,
        limit: u32,
        cursor: Option<&str>,
    ) -> CirrusResult<TimelineResponse> {
        let url = format!("{}/feed", self.base_url);

        let mut request = self
            .client
            .get(&url)
            .query(&[("limit", limit.to_string())])
            .header("Authorization", format!("Bearer {}", token));
        if let Some(cursor) = cursor {
            request = request.query(&[("cursor", cursor)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e, "fetch feed"))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(status, body = %message, "feed fetch failed");
            return Err(NetworkError::HttpStatus { status, message }.into());
        }

        let text = response
            .text()
            .await
            .map_err(|e| classify_reqwest_error(&e, "fetch feed"))?;
        let timeline: TimelineResponse = serde_json::from_str(&text)?;
        Ok(timeline)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CirrusError;

    #[test]
    fn test_api_client_new() {
        let client = ApiClient::new();
        assert_eq!(client.base_url, DEFAULT_SERVICE_URL);
    }

    #[test]
    fn test_api_client_with_base_url() {
        let custom = "http://localhost:8080".to_string();
        let client = ApiClient::with_base_url(custom.clone());
        assert_eq!(client.base_url, custom);
    }

    #[test]
    fn test_api_client_default() {
        let client = ApiClient::default();
        assert_eq!(client.base_url, DEFAULT_SERVICE_URL);
    }

    // Error-path tests against an address nothing listens on; the happy
    // paths are covered by the wiremock suites in tests/.

    #[tokio::test]
    async fn test_create_session_with_unreachable_server() {
        let client = ApiClient::with_base_url("http://127.0.0.1:1".to_string());
        let err = client.create_session("user", "secret").await.unwrap_err();
        assert!(matches!(err, CirrusError::Network(_)));
    }

    #[tokio::test]
    async fn test_refresh_session_with_unreachable_server() {
        let client = ApiClient::with_base_url("http://127.0.0.1:1".to_string());
        let err = client.refresh_session("refresh").await.unwrap_err();
        assert!(matches!(err, CirrusError::Network(_)));
    }

    #[tokio::test]
    async fn test_fetch_timeline_with_unreachable_server() {
        let client = ApiClient::with_base_url("http://127.0.0.1:1".to_string());
        let err = client.fetch_timeline("token", 50, None).await.unwrap_err();
        assert!(matches!(err, CirrusError::Network(_)));
    }
}
