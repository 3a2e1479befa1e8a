// src/auth/claims.rs
//! Reads the payload of the backend's access token. The signature is not
//! checked here; the backend verifies it on every call. We only need `exp`
//! to avoid keeping a session alive past its token.

use base64::Engine;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClaimsError {
    #[error("token is not a three-part JWT")]
    Shape,
    #[error("token payload is not base64url: {0}")]
    Encoding(String),
    #[error("token payload is not JSON: {0}")]
    Payload(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub sub: Option<String>,
}

pub fn decode_claims(token: &str) -> Result<TokenClaims, ClaimsError> {
    let mut parts = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(ClaimsError::Shape);
    };

    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| ClaimsError::Encoding(e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| ClaimsError::Payload(e.to_string()))
}

/// Session expiry: the earlier of `now + ttl_secs` and the token's `exp`.
/// An unreadable token falls back to the TTL and is logged.
pub fn session_expiry(token: &str, now: i64, ttl_secs: i64) -> i64 {
    let by_ttl = now + ttl_secs;
    match decode_claims(token) {
        Ok(TokenClaims { exp: Some(exp), .. }) => exp.min(by_ttl),
        Ok(_) => by_ttl,
        Err(err) => {
            tracing::warn!(error = %err, "access token claims unreadable, using session ttl");
            by_ttl
        }
    }
}
