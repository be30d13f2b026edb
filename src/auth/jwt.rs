//! Access-token expiry decision.
//!
//! Access tokens are JWTs; the only claim the core reads is `exp`. A token
//! that cannot be decoded is treated as expired so the session manager
//! refreshes instead of sending a broken token.

use base64::{engine::general_purpose::STANDARD, Engine};

/// Decode the `exp` claim (Unix seconds) from a JWT access token.
///
/// The payload is the middle of three dot-separated segments, padded to a
/// multiple of four and decoded as standard base64, then parsed as a JSON
/// object. Returns `None` for any structural failure: wrong segment count,
/// undecodable payload, or a missing/non-numeric `exp`.
pub fn decode_expiry(token: &str) -> Option<f64> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }

    let mut payload = parts[1].to_string();
    let remainder = payload.len() % 4;
    if remainder > 0 {
        payload.push_str(&"=".repeat(4 - remainder));
    }

    let decoded = STANDARD.decode(payload).ok()?;
    let json: serde_json::Value = serde_json::from_slice(&decoded).ok()?;
    json.as_object()?.get("exp")?.as_f64()
}

/// Check whether a token is expired.
///
/// Undecodable tokens count as expired: the failure mode is an extra
/// refresh, never a request sent with a dead token.
pub fn is_token_expired(token: &str) -> bool {
    match decode_expiry(token) {
        Some(exp) => chrono::Utc::now().timestamp() as f64 >= exp,
        None => true,
    }
}
