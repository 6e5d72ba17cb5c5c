//! In-memory collaborators for tests/dev.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use studio_auth::{
    Credential, IdentityProvider, MemberRow, ProviderError, ProviderUser, ReadOnlyDataStore, StoreError,
    UserRow,
};
use studio_core::{GotrueId, OrgSlug, OrganizationId, ProjectRef, UserId};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<GotrueId, UserRow>,
    organizations: HashMap<String, OrganizationId>,
    projects: HashMap<String, OrganizationId>,
    members: HashSet<(OrganizationId, UserId)>,
}

/// In-memory read store. Writes exist only to seed fixtures.
#[derive(Debug, Default)]
pub struct InMemoryReadStore {
    inner: RwLock<Tables>,
}

impl InMemoryReadStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_user(&self, gotrue_id: GotrueId, row: UserRow) {
        if let Ok(mut t) = self.inner.write() {
            t.users.insert(gotrue_id, row);
        }
    }

    pub fn insert_organization(&self, slug: &str, id: OrganizationId) {
        if let Ok(mut t) = self.inner.write() {
            t.organizations.insert(slug.to_string(), id);
        }
    }

    pub fn insert_project(&self, project_ref: &str, organization_id: OrganizationId) {
        if let Ok(mut t) = self.inner.write() {
            t.projects.insert(project_ref.to_string(), organization_id);
        }
    }

    pub fn insert_member(&self, organization_id: OrganizationId, user_id: UserId) {
        if let Ok(mut t) = self.inner.write() {
            t.members.insert((organization_id, user_id));
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Tables>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Unavailable("in-memory store poisoned".into()))
    }
}

#[async_trait::async_trait]
impl ReadOnlyDataStore for InMemoryReadStore {
    async fn find_user_by_gotrue_id(&self, gotrue_id: &GotrueId) -> Result<Option<UserRow>, StoreError> {
        Ok(self.read()?.users.get(gotrue_id).cloned())
    }

    async fn find_organization_by_slug(&self, slug: &OrgSlug) -> Result<Option<OrganizationId>, StoreError> {
        Ok(self.read()?.organizations.get(slug.as_str()).copied())
    }

    async fn find_project_organization(
        &self,
        project_ref: &ProjectRef,
    ) -> Result<Option<OrganizationId>, StoreError> {
        Ok(self.read()?.projects.get(project_ref.as_str()).copied())
    }

    async fn find_membership(
        &self,
        organization_id: OrganizationId,
        user_id: UserId,
    ) -> Result<Option<MemberRow>, StoreError> {
        Ok(self
            .read()?
            .members
            .contains(&(organization_id, user_id))
            .then_some(MemberRow { id: organization_id.get() }))
    }
}

/// Identity provider backed by a fixed token → user table.
#[derive(Debug, Default)]
pub struct StaticIdentityProvider {
    users: RwLock<HashMap<String, ProviderUser>>,
}

impl StaticIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, token: &str, user: ProviderUser) {
        if let Ok(mut users) = self.users.write() {
            users.insert(token.to_string(), user);
        }
    }
}

#[async_trait::async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn exchange(&self, credential: &Credential) -> Result<Option<ProviderUser>, ProviderError> {
        let users = self
            .users
            .read()
            .map_err(|_| ProviderError::Transport("static provider poisoned".into()))?;
        users
            .get(credential.expose())
            .cloned()
            .map(Some)
            .ok_or_else(|| ProviderError::Rejected("invalid JWT: unable to parse or verify signature".into()))
    }
}
