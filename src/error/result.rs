//! Result type alias for core operations.

use super::CirrusError;

/// Result alias used throughout the crate surface.
pub type CirrusResult<T> = Result<T, CirrusError>;
