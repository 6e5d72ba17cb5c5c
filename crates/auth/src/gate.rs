//! Authentication gate: credential → identity, plus organization membership.
//!
//! Order of operations per request:
//! 1. extract the bearer credential
//! 2. exchange it with the identity provider and load the users row
//! 3. only if the request names an organization or project: resolve it to an
//!    organization (slug first, then project ref) and require a membership row
//!
//! Nothing is cached; every call re-resolves and re-verifies.

use std::sync::Arc;

use tracing::{debug, warn};

use studio_core::{Identity, OrganizationId, ResourceScope, ScopeTarget};

use crate::{AuthError, AuthRequest, Credential, IdentityProvider, ProviderError, ReadOnlyDataStore};

#[derive(Clone)]
pub struct AuthGate {
    provider: Arc<dyn IdentityProvider>,
    store: Arc<dyn ReadOnlyDataStore>,
}

impl AuthGate {
    pub fn new(provider: Arc<dyn IdentityProvider>, store: Arc<dyn ReadOnlyDataStore>) -> Self {
        Self { provider, store }
    }

    /// Resolve the caller of `request`.
    ///
    /// Never panics and never lets a collaborator failure escape as anything
    /// other than an [`AuthError`].
    pub async fn authenticate(&self, request: &AuthRequest) -> Result<Identity, AuthError> {
        let result = self.try_authenticate(request).await;
        if let Err(e) = &result {
            warn!(code = e.code(), error = %e, "Error at authenticate");
        }
        result
    }

    async fn try_authenticate(&self, request: &AuthRequest) -> Result<Identity, AuthError> {
        let credential = Credential::from_authorization(request.authorization.as_deref())?;
        let identity = self.fetch_user(&credential).await?;

        if !request.scope.is_empty() {
            self.check_member_permission(&request.scope, &identity).await?;
        }

        Ok(identity)
    }

    async fn fetch_user(&self, credential: &Credential) -> Result<Identity, AuthError> {
        let provider_user = self
            .provider
            .exchange(credential)
            .await
            .map_err(provider_error)?
            .ok_or(AuthError::UserNotFound)?;

        let details = self
            .provider
            .extract_identity_details(&provider_user)
            .map_err(provider_error)?;

        let row = match self.store.find_user_by_gotrue_id(&provider_user.id).await {
            Ok(Some(row)) => row,
            Ok(None) => return Err(AuthError::UserNotFound),
            Err(e) => {
                warn!(gotrue_id = %provider_user.id, error = %e, "users lookup failed");
                return Err(AuthError::UserNotFound);
            }
        };

        debug!(user_id = %row.id, provider = %details.provider, "identity resolved");
        Ok(row.into_identity(provider_user.id, Some(details.external_id)))
    }

    async fn resolve_organization(&self, scope: &ResourceScope) -> Result<OrganizationId, AuthError> {
        let lookup = match scope.target() {
            Some(ScopeTarget::Organization(slug)) => self.store.find_organization_by_slug(slug).await,
            Some(ScopeTarget::Project(project_ref)) => {
                self.store.find_project_organization(project_ref).await
            }
            None => return Err(AuthError::ResourceNotFound),
        };

        match lookup {
            Ok(Some(org)) => Ok(org),
            Ok(None) => Err(AuthError::ResourceNotFound),
            Err(e) => {
                warn!(error = %e, "organization lookup failed");
                Err(AuthError::ResourceNotFound)
            }
        }
    }

    async fn check_member_permission(
        &self,
        scope: &ResourceScope,
        identity: &Identity,
    ) -> Result<(), AuthError> {
        let organization_id = self.resolve_organization(scope).await?;

        match self.store.find_membership(organization_id, identity.id).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(AuthError::PermissionDenied),
            Err(e) => {
                warn!(%organization_id, user_id = %identity.id, error = %e, "membership lookup failed");
                Err(AuthError::PermissionDenied)
            }
        }
    }
}

fn provider_error(e: ProviderError) -> AuthError {
    AuthError::IdentityProviderError(e.to_string())
}
