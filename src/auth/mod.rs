//! Authentication for the cirrus core.
//!
//! This module provides:
//! - Credential storage on disk
//! - JWT expiry decisions
//! - The session lifecycle manager (login, refresh, logout)

pub mod credentials;
pub mod jwt;
pub mod session;

pub use credentials::{Credentials, CredentialsManager};
pub use session::{Session, SessionManager};
