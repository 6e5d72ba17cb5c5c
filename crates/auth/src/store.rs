//! Read-only data store contract used by the gate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use studio_core::{GotrueId, Identity, OrgSlug, OrganizationId, ProjectRef, UserId};

/// Profile columns of a `users` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRow {
    pub id: UserId,
    pub auth0_id: Option<String>,
    pub primary_email: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub mobile: Option<String>,
    pub is_alpha_user: bool,
}

impl UserRow {
    /// Combine the row with the provider-side identifiers.
    pub fn into_identity(self, gotrue_id: GotrueId, external_id: Option<String>) -> Identity {
        Identity {
            id: self.id,
            gotrue_id,
            auth0_id: self.auth0_id.or(external_id),
            primary_email: self.primary_email,
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
            mobile: self.mobile,
            is_alpha_user: self.is_alpha_user,
        }
    }
}

/// A `members` row (only its key is read).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRow {
    pub id: i64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("query failed: {0}")]
    Query(String),
}

/// Single-row lookups against the users/organizations/projects/members tables.
///
/// Every method returns at most one row; `Ok(None)` is "not found".
#[async_trait::async_trait]
pub trait ReadOnlyDataStore: Send + Sync {
    async fn find_user_by_gotrue_id(&self, gotrue_id: &GotrueId) -> Result<Option<UserRow>, StoreError>;

    async fn find_organization_by_slug(&self, slug: &OrgSlug) -> Result<Option<OrganizationId>, StoreError>;

    /// Parent organization of the project with the given ref.
    async fn find_project_organization(
        &self,
        project_ref: &ProjectRef,
    ) -> Result<Option<OrganizationId>, StoreError>;

    async fn find_membership(
        &self,
        organization_id: OrganizationId,
        user_id: UserId,
    ) -> Result<Option<MemberRow>, StoreError>;
}
