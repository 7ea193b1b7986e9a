//! Pre-request authorization and expiry check.

use std::sync::Arc;

use tracing::{debug, warn};

use studymate_core::claims::{self, Identity};
use studymate_core::error::{AuthError, Error};
use studymate_core::{AccessToken, TokenStore};

/// Decides the credential for every outgoing request.
///
/// Consulted immediately before transmission. No persisted token means the
/// request passes through unauthenticated. A present token has its expiry
/// claim decoded (unverified); expired or undecodable tokens kill the
/// session: the store is cleared and the request is aborted with
/// [`AuthError::SessionExpired`] instead of being sent without
/// credentials.
///
/// Guarantee: an expired token is never attached.
#[derive(Clone)]
pub struct RequestAuthorizer {
    store: Arc<dyn TokenStore>,
}

impl RequestAuthorizer {
    /// Create an authorizer over the given store.
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    /// Decide the credential for a request, evaluated at the current time.
    pub fn bearer(&self) -> Result<Option<AccessToken>, Error> {
        self.bearer_at(claims::now_epoch_seconds())
    }

    /// Decide the credential for a request, evaluated at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::SessionExpired`] after clearing the store when
    /// the persisted token is expired or malformed. Storage failures
    /// propagate as-is.
    pub fn bearer_at(&self, now: i64) -> Result<Option<AccessToken>, Error> {
        let Some(pair) = self.store.read()? else {
            debug!("no persisted tokens, request proceeds unauthenticated");
            return Ok(None);
        };

        match Identity::from_access_token(pair.access.as_str()) {
            Ok(identity) if !identity.is_expired(now) => Ok(Some(pair.access)),
            Ok(identity) => {
                warn!(
                    expired_at = identity.expires_at,
                    "access token expired, clearing session"
                );
                self.store.clear()?;
                Err(AuthError::SessionExpired.into())
            }
            Err(error) => {
                // Malformed is treated exactly like expired rather than
                // surfacing a decode failure to the caller.
                warn!(%error, "access token malformed, clearing session");
                self.store.clear()?;
                Err(AuthError::SessionExpired.into())
            }
        }
    }
}

impl std::fmt::Debug for RequestAuthorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestAuthorizer").finish_non_exhaustive()
    }
}
