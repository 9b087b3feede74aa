use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::claims::{CredentialDecodeError, SessionClaims, TokenValidationError, decode_unverified};
use crate::{CredentialStore, PrincipalId};

/// Well-known storage key written by the login page.
pub const SESSION_CREDENTIAL_KEY: &str = "token";

/// Why a caller that needs a usable session could not get one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("no active session; please log in")]
    NoSession,

    #[error("session is corrupted; please log in again: {0}")]
    Decode(#[from] CredentialDecodeError),

    #[error("session is no longer valid; please log in again: {0}")]
    Stale(#[from] TokenValidationError),
}

/// Derives the acting principal from the stored session credential.
///
/// Purely local: one synchronous store read plus a decode. No round trip is
/// made to the login service, which means the claims are **trusted without
/// signature verification**. The first time a resolver hands out such an
/// identity it logs a warning so the gap stays visible.
pub struct SessionIdentityResolver {
    store: Arc<dyn CredentialStore>,
    key: String,
    warned_unverified: AtomicBool,
}

impl SessionIdentityResolver {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self::with_key(store, SESSION_CREDENTIAL_KEY)
    }

    pub fn with_key(store: Arc<dyn CredentialStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            warned_unverified: AtomicBool::new(false),
        }
    }

    /// Claims of the stored credential.
    ///
    /// - no credential stored → `Ok(None)`
    /// - credential decodes → `Ok(Some(claims))`
    /// - credential present but unusable → `Err(_)`
    pub fn current_claims(&self) -> Result<Option<SessionClaims>, CredentialDecodeError> {
        let Some(raw) = self.store.get(&self.key) else {
            tracing::debug!(key = %self.key, "no session credential stored");
            return Ok(None);
        };

        let claims = decode_unverified(&raw).map_err(|e| {
            tracing::warn!(key = %self.key, error = %e, "stored session credential is unusable");
            e
        })?;

        if !self.warned_unverified.swap(true, Ordering::Relaxed) {
            tracing::warn!(
                principal_id = %claims.principal_id,
                "trusting session claims without signature verification"
            );
        }

        Ok(Some(claims))
    }

    /// Identifier of the principal the stored credential was issued to.
    pub fn current_principal_id(&self) -> Result<Option<PrincipalId>, CredentialDecodeError> {
        Ok(self.current_claims()?.map(|c| c.principal_id))
    }

    /// Like [`Self::current_principal_id`] but folds "no session" into the
    /// error and also refuses sessions whose `iat`/`exp` window excludes `now`.
    pub fn require_fresh_principal(&self, now: DateTime<Utc>) -> Result<PrincipalId, SessionError> {
        let claims = self.current_claims()?.ok_or(SessionError::NoSession)?;
        claims.check_time_window(now)?;
        Ok(claims.principal_id)
    }
}

impl core::fmt::Debug for SessionIdentityResolver {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionIdentityResolver")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryCredentialStore;
    use crate::claims::mint_credential;
    use chrono::Duration;
    use serde_json::json;
    use vetforum_core::WireId;

    fn resolver_with(token: Option<&str>) -> SessionIdentityResolver {
        let store = InMemoryCredentialStore::new();
        if let Some(token) = token {
            store.insert(SESSION_CREDENTIAL_KEY, token);
        }
        SessionIdentityResolver::new(Arc::new(store))
    }

    #[test]
    fn empty_store_means_no_session() {
        let resolver = resolver_with(None);
        assert_eq!(resolver.current_principal_id(), Ok(None));
    }

    #[test]
    fn well_formed_credential_yields_principal() {
        let token = mint_credential(&json!({ "_id": "65f0c2a1e4b0a1b2c3d4e5f6" }));
        let resolver = resolver_with(Some(&token));

        let id = resolver.current_principal_id().unwrap().unwrap();
        assert_eq!(id.as_wire(), &WireId::Text("65f0c2a1e4b0a1b2c3d4e5f6".to_string()));

        // Repeated reads are idempotent.
        assert_eq!(resolver.current_principal_id().unwrap(), Some(id));
    }

    #[test]
    fn corrupted_credential_is_an_error_not_an_absent_session() {
        let token = mint_credential(&json!({ "_id": 5 }));
        let truncated = &token[..token.len() / 2];

        for bad in [truncated, "garbage", ""] {
            let resolver = resolver_with(Some(bad));
            assert!(resolver.current_principal_id().is_err(), "{bad:?}");
        }
    }

    #[test]
    fn custom_storage_key() {
        let token = mint_credential(&json!({ "_id": 9 }));
        let store = InMemoryCredentialStore::with_entry("session", token);
        let resolver = SessionIdentityResolver::with_key(Arc::new(store), "session");
        assert_eq!(
            resolver.current_principal_id().unwrap().unwrap().as_wire(),
            &WireId::Number(9)
        );
    }

    #[test]
    fn fresh_principal_requires_a_live_session() {
        let now = Utc::now();

        assert_eq!(
            resolver_with(None).require_fresh_principal(now),
            Err(SessionError::NoSession)
        );

        let expired = mint_credential(&json!({ "_id": 1, "exp": (now - Duration::hours(1)).timestamp() }));
        assert_eq!(
            resolver_with(Some(&expired)).require_fresh_principal(now),
            Err(SessionError::Stale(TokenValidationError::Expired))
        );

        let live = mint_credential(&json!({ "_id": 1, "exp": (now + Duration::hours(1)).timestamp() }));
        assert_eq!(
            resolver_with(Some(&live)).require_fresh_principal(now).unwrap().as_wire(),
            &WireId::Number(1)
        );

        assert!(matches!(
            resolver_with(Some("x.y")).require_fresh_principal(now),
            Err(SessionError::Decode(_))
        ));
    }
}
