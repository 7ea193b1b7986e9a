//! Token types for backend authentication.

use std::fmt;

/// An access token for authenticated backend requests.
///
/// Access tokens are short-lived JWTs attached as bearer credentials.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Opaque to everything except the expiry-claim check in [`crate::claims`]
#[derive(Clone)]
pub struct AccessToken(String);

impl AccessToken {
    /// Create a new access token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value.
    ///
    /// # Security
    ///
    /// Use only when constructing authorization headers or persisting
    /// the session.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Hide token value in Debug output
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

/// A refresh token stored alongside the access token.
///
/// The backend issues one on login; no client-side renewal flow uses it
/// yet, so it is persisted and carried as an opaque string only.
///
/// # Security
///
/// - Never logged or displayed in Debug output
#[derive(Clone)]
pub struct RefreshToken(String);

impl RefreshToken {
    /// Create a new refresh token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for persistence.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Hide token value in Debug output
impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RefreshToken").field(&"[REDACTED]").finish()
    }
}

/// The token pair returned by login and owned by the session store.
///
/// Persisted as two opaque strings; no structural validation is performed
/// client-side beyond the expiry-claim inspection of the access token.
#[derive(Debug, Clone)]
pub struct TokenPair {
    /// Short-lived credential attached to authenticated requests.
    pub access: AccessToken,
    /// Longer-lived credential, stored but unused by any renewal flow.
    pub refresh: RefreshToken,
}

impl TokenPair {
    /// Create a token pair from raw token strings.
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: AccessToken::new(access),
            refresh: RefreshToken::new(refresh),
        }
    }
}
