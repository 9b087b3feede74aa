//! `vetforum-auth` — session identity boundary.
//!
//! Recovers the acting principal from the locally stored session credential.
//! This crate never talks to the network and never writes the credential:
//! login and logout happen elsewhere.

pub mod claims;
pub mod principal;
pub mod session;
pub mod store;

pub use claims::{CredentialDecodeError, SessionClaims, TokenValidationError, decode_unverified};
pub use principal::PrincipalId;
pub use session::{SESSION_CREDENTIAL_KEY, SessionError, SessionIdentityResolver};
pub use store::{CredentialStore, CredentialStoreError, FileCredentialStore, InMemoryCredentialStore};

#[cfg(target_arch = "wasm32")]
pub use store::BrowserCredentialStore;
