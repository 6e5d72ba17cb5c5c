//! `studio-auth` — request authentication gate.
//!
//! This crate is intentionally decoupled from HTTP and storage: the identity
//! provider and the data store are traits implemented elsewhere.

pub mod credential;
pub mod error;
pub mod gate;
pub mod provider;
pub mod store;

pub use credential::{AuthRequest, Credential};
pub use error::{AuthError, AuthErrorKind, ErrorBody};
pub use gate::AuthGate;
pub use provider::{
    IdentityDetails, IdentityProvider, ProviderError, ProviderIdentity, ProviderUser, legacy_external_id,
};
pub use store::{MemberRow, ReadOnlyDataStore, StoreError, UserRow};
