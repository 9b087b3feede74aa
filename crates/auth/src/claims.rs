use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::PrincipalId;

/// Claims carried by the session credential.
///
/// Only the principal identifier is required. Issued-at and expiry are read
/// when the login service includes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionClaims {
    /// Principal identifier (`_id` claim).
    #[serde(rename = "_id")]
    pub principal_id: PrincipalId,

    /// Issued-at timestamp (`iat`).
    #[serde(rename = "iat", skip_serializing_if = "Option::is_none", with = "chrono::serde::ts_seconds_option")]
    pub issued_at: Option<DateTime<Utc>>,

    /// Expiration timestamp (`exp`).
    #[serde(rename = "exp", skip_serializing_if = "Option::is_none", with = "chrono::serde::ts_seconds_option")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Claims exactly as they appear in the token payload.
#[derive(Debug, Deserialize)]
struct RawClaims {
    #[serde(rename = "_id", default)]
    principal_id: Option<PrincipalId>,
    #[serde(default)]
    iat: Option<serde_json::Value>,
    #[serde(default)]
    exp: Option<serde_json::Value>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialDecodeError {
    #[error("stored session credential is blank")]
    Blank,

    #[error("session credential could not be decoded: {0}")]
    Malformed(String),

    #[error("session credential carries no principal identifier")]
    MissingPrincipal,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("session has expired")]
    Expired,

    #[error("session not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid session time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

impl SessionClaims {
    /// Deterministically check the optional time claims against `now`.
    ///
    /// Absent claims impose no constraint.
    pub fn check_time_window(&self, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
        if let (Some(issued_at), Some(expires_at)) = (self.issued_at, self.expires_at) {
            if expires_at <= issued_at {
                return Err(TokenValidationError::InvalidTimeWindow);
            }
        }
        if let Some(issued_at) = self.issued_at {
            if now < issued_at {
                return Err(TokenValidationError::NotYetValid);
            }
        }
        if let Some(expires_at) = self.expires_at {
            if now >= expires_at {
                return Err(TokenValidationError::Expired);
            }
        }
        Ok(())
    }
}

/// Decode the claims of a session credential **without verifying its
/// signature**.
///
/// The client holds no key for the login service, so the signature cannot be
/// checked here. Claims decoded this way identify the user for display and
/// authoring purposes only; the server must still authenticate every write.
pub fn decode_unverified(token: &str) -> Result<SessionClaims, CredentialDecodeError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(CredentialDecodeError::Blank);
    }

    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = jsonwebtoken::decode::<RawClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|e| CredentialDecodeError::Malformed(e.to_string()))?;

    let raw = data.claims;
    let principal_id = raw.principal_id.ok_or(CredentialDecodeError::MissingPrincipal)?;

    Ok(SessionClaims {
        principal_id,
        issued_at: timestamp(raw.iat, "iat"),
        expires_at: timestamp(raw.exp, "exp"),
    })
}

/// NumericDate claim as a UTC instant. Fractional seconds are truncated.
///
/// A time claim that is not a representable number is dropped rather than
/// failing the whole credential: the principal id stays usable.
fn timestamp(value: Option<serde_json::Value>, claim: &'static str) -> Option<DateTime<Utc>> {
    let value = value?;
    let parsed = value
        .as_f64()
        .filter(|secs| secs.is_finite())
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs.trunc() as i64, 0));
    if parsed.is_none() {
        tracing::warn!(claim, "ignoring unusable time claim in session credential");
    }
    parsed
}

/// Mint an HS256 token around arbitrary claims (tests only).
#[cfg(test)]
pub(crate) fn mint_credential(claims: &serde_json::Value) -> String {
    use jsonwebtoken::{Algorithm, EncodingKey, Header};

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(b"login-service-secret"),
    )
    .expect("failed to encode jwt")
}
