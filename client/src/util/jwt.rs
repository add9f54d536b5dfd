//! Client-side access-token decoding.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store derives the signed-in identity from the access token's
//! claims. Signatures are NOT verified here: decoded claims drive UI
//! personalization only, and the API re-validates every token it receives.

#[cfg(test)]
#[path = "jwt_test.rs"]
mod jwt_test;

use jsonwebtoken::dangerous::insecure_decode;
use serde::Deserialize;

use crate::net::types::UserIdentity;

/// Reasons a token could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("token has no expiry claim")]
    MissingExpiry,
}

#[derive(Deserialize)]
struct ExpiryClaim {
    #[serde(default)]
    exp: Option<f64>,
}

/// Decode the identity claims carried by an access token.
///
/// # Errors
///
/// Returns [`DecodeError`] when the token is not a well-formed JWT or its
/// claims lack `user_id`/`username`.
pub fn decode(token: &str) -> Result<UserIdentity, DecodeError> {
    Ok(insecure_decode::<UserIdentity>(token)?.claims)
}

/// Read the `exp` claim (seconds since the Unix epoch).
///
/// # Errors
///
/// Returns [`DecodeError::MissingExpiry`] when the claim is absent, or another
/// variant when the token itself cannot be decoded.
#[allow(clippy::cast_possible_truncation)]
pub fn expiry(token: &str) -> Result<i64, DecodeError> {
    insecure_decode::<ExpiryClaim>(token)?
        .claims
        .exp
        .filter(|exp| exp.is_finite())
        .map(|exp| exp.floor() as i64)
        .ok_or(DecodeError::MissingExpiry)
}

/// Whether `token` is expired at `now` (whole seconds since the Unix epoch).
///
/// A token is expired from its `exp` second onward, since `now` is floored.
/// Any decode failure counts as expired.
pub fn is_expired(token: &str, now: i64) -> bool {
    if token.is_empty() {
        return true;
    }
    match expiry(token) {
        Ok(exp) => exp <= now,
        Err(e) => {
            leptos::logging::warn!("invalid access token: {e}");
            true
        }
    }
}

/// Current time in whole seconds since the Unix epoch.
#[allow(clippy::cast_possible_truncation)]
pub fn unix_now() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        (js_sys::Date::now() / 1000.0).floor() as i64
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
    }
}
