//! Prelude module for convenient imports.
//!
//! # Usage
//!
//! ```ignore
//! use cirrus::prelude::*;
//! ```
//!
//! This imports the caller-facing surface: the API client, the session
//! manager, the feed synchronizer, and the error types.

// Core surface
pub use crate::api::ApiClient;
pub use crate::auth::{Session, SessionManager};
pub use crate::sync::{
    FeedEvent, FeedSynchronizer, SyncOutcome, TimelineEntry, DEFAULT_PAGE_LIMIT,
    DEFAULT_REFRESH_INTERVAL,
};

// Storage
pub use crate::adapters::{FileCredentialStore, MemoryCredentialStore};
pub use crate::traits::CredentialStore;

// Models
pub use crate::models::{Actor, FeedItem, Post, Reason, Reply, TimelineResponse};

// Errors
pub use crate::error::{AuthError, CirrusError, CirrusResult, NetworkError};
