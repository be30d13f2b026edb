//! Trait abstractions for dependency injection and testability.
//!
//! The credential store is the one seam the core shares with the outside
//! world across restarts, so it gets a trait; production code injects the
//! file-backed adapter and tests inject the in-memory one.

pub mod credentials;

pub use credentials::{CredentialStore, CredentialsError};
