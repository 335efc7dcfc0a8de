// SPDX-License-Identifier: MIT

//! Access-token claim inspection.
//!
//! The client never verifies token signatures; it has no signing key and the
//! server is authoritative. It only needs the `exp` claim to decide whether a
//! stored access token is worth sending or should be refreshed first.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::error::ApiError;

/// Claims the client cares about.
#[derive(Debug, Deserialize)]
struct Claims {
    /// Expiration time (Unix timestamp)
    exp: i64,
}

/// Decode the expiry instant embedded in an access token.
///
/// Signature validation is deliberately disabled; a forged `exp` buys an
/// attacker nothing since every request is re-checked server-side.
pub fn expires_at(token: &str) -> Result<DateTime<Utc>, ApiError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;

    let data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|e| ApiError::Decode(format!("malformed access token: {e}")))?;

    DateTime::from_timestamp(data.claims.exp, 0)
        .ok_or_else(|| ApiError::Decode("access token exp out of range".to_string()))
}
