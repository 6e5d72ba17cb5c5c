//! `studio-core` — request-scoped primitives shared by the studio backend.
//!
//! This crate contains **pure** types (no IO).

pub mod error;
pub mod id;
pub mod identity;
pub mod scope;

pub use error::{DomainError, DomainResult};
pub use id::{GotrueId, OrganizationId, UserId};
pub use identity::Identity;
pub use scope::{OrgSlug, ProjectRef, ResourceScope, ScopeTarget};
