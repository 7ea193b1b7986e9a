//! Unverified access-token claim decoding.
//!
//! The payload segment of the access token is decoded without checking the
//! signature; the backend re-verifies the token on every request, so the
//! decoded claim set is a UI hint rather than a security boundary. Keeping
//! the decode behind this module (and the store seam) means verification
//! could be added later without touching callers.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::{Map, Value};

use crate::error::{AuthError, Error};

/// The claim set decoded from an access token.
///
/// Derived, never stored: it is valid only for the token string it was
/// decoded from and becomes stale the instant that token is replaced or
/// removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    /// Whom the token was issued to.
    pub subject: String,
    /// Expiry instant in epoch seconds.
    pub expires_at: i64,
    /// The full decoded claim set, including the fields above.
    pub claims: Map<String, Value>,
}

impl Identity {
    /// Decode the claim set from an access token, without verification.
    ///
    /// The subject is taken from the `sub` claim, falling back to
    /// `username` and then `user_id` (the backend's token serializer is
    /// not guaranteed to emit `sub`).
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedToken`] if the token is not a
    /// three-segment JWT, the payload is not base64url JSON, or the claim
    /// set lacks an expiry or any subject-like claim.
    pub fn from_access_token(token: &str) -> Result<Self, Error> {
        let mut segments = token.split('.');
        let (Some(_header), Some(payload), Some(_signature), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(malformed("token is not a three-segment JWT"));
        };

        // Payloads are unpadded base64url, but tolerate padded encoders.
        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| malformed(format!("payload is not base64url: {e}")))?;

        let claims: Map<String, Value> = serde_json::from_slice(&bytes)
            .map_err(|e| malformed(format!("payload is not a JSON claim set: {e}")))?;

        let expires_at = claims
            .get("exp")
            .and_then(Value::as_i64)
            .ok_or_else(|| malformed("missing or non-numeric exp claim"))?;

        let subject = claims
            .get("sub")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .or_else(|| {
                claims
                    .get("username")
                    .and_then(Value::as_str)
                    .map(str::to_owned)
            })
            .or_else(|| claims.get("user_id").map(claim_to_string))
            .ok_or_else(|| malformed("no subject claim (sub, username or user_id)"))?;

        Ok(Self {
            subject,
            expires_at,
            claims,
        })
    }

    /// Whether the token this identity came from has expired.
    ///
    /// Strict comparison: a token expiring exactly `now` is still usable.
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at < now
    }

    /// Look up an arbitrary claim by name.
    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }

    /// The `username` claim, when the backend includes one.
    pub fn username(&self) -> Option<&str> {
        self.claims.get("username").and_then(Value::as_str)
    }
}

/// Current time in epoch seconds, as compared against the `exp` claim.
pub fn now_epoch_seconds() -> i64 {
    chrono::Utc::now().timestamp()
}

fn malformed(reason: impl Into<String>) -> Error {
    AuthError::MalformedToken {
        reason: reason.into(),
    }
    .into()
}

fn claim_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
