//! Identity provider contract (credential → provider user).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use studio_core::GotrueId;

use crate::Credential;

/// User record as returned by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderUser {
    pub id: GotrueId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub identities: Option<Vec<ProviderIdentity>>,
}

/// A login method linked to a provider user (github, sso, email, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderIdentity {
    /// Identifier of the user at `provider`.
    pub id: String,
    pub provider: String,
}

/// Details derived from the user's primary linked identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityDetails {
    pub provider: String,
    pub provider_id: String,
    /// Legacy external id, see [`legacy_external_id`].
    pub external_id: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider answered and refused the credential.
    #[error("{0}")]
    Rejected(String),

    /// The provider could not be reached or answered garbage.
    #[error("identity provider request failed: {0}")]
    Transport(String),

    #[error("Missing identity")]
    MissingIdentity,
}

/// Exchanges credentials for provider users.
///
/// Implementations are shared read-only collaborators; they hold no
/// per-request state.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve a credential. `Ok(None)` means the provider knows no user for it.
    async fn exchange(&self, credential: &Credential) -> Result<Option<ProviderUser>, ProviderError>;

    /// Pick the primary linked identity of a provider user.
    fn extract_identity_details(&self, user: &ProviderUser) -> Result<IdentityDetails, ProviderError> {
        let identity = user
            .identities
            .as_ref()
            .and_then(|ids| ids.first())
            .ok_or(ProviderError::MissingIdentity)?;

        Ok(IdentityDetails {
            provider: identity.provider.clone(),
            provider_id: identity.id.clone(),
            external_id: legacy_external_id(&identity.provider, &identity.id),
        })
    }
}

/// `<connection>|<id>` identifier used by users created before the move to
/// the current provider.
pub fn legacy_external_id(provider: &str, provider_id: &str) -> String {
    let connection = match provider {
        "sso" => "samlp",
        other => other,
    };
    format!("{connection}|{provider_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopProvider;

    #[async_trait::async_trait]
    impl IdentityProvider for NoopProvider {
        async fn exchange(&self, _credential: &Credential) -> Result<Option<ProviderUser>, ProviderError> {
            Ok(None)
        }
    }

    fn user(identities: Option<Vec<ProviderIdentity>>) -> ProviderUser {
        ProviderUser {
            id: GotrueId::from_uuid(uuid::Uuid::nil()),
            email: Some("ada@example.com".into()),
            identities,
        }
    }

    #[test]
    fn external_id_per_provider() {
        assert_eq!(legacy_external_id("github", "123"), "github|123");
        assert_eq!(legacy_external_id("sso", "abc"), "samlp|abc");
        assert_eq!(legacy_external_id("email", "x"), "email|x");
    }

    #[test]
    fn first_identity_is_primary() {
        let u = user(Some(vec![
            ProviderIdentity { id: "77".into(), provider: "github".into() },
            ProviderIdentity { id: "x".into(), provider: "email".into() },
        ]));
        let details = NoopProvider.extract_identity_details(&u).unwrap();
        assert_eq!(details.external_id, "github|77");
    }

    #[test]
    fn missing_identity_list_is_an_error() {
        assert_eq!(
            NoopProvider.extract_identity_details(&user(None)),
            Err(ProviderError::MissingIdentity)
        );
        assert_eq!(
            NoopProvider.extract_identity_details(&user(Some(vec![]))),
            Err(ProviderError::MissingIdentity)
        );
    }

    #[test]
    fn provider_user_parses_gotrue_payload() {
        let json = serde_json::json!({
            "id": "00000000-0000-0000-0000-000000000000",
            "aud": "authenticated",
            "email": "ada@example.com",
            "identities": [{ "id": "77", "provider": "github", "user_id": "00000000-0000-0000-0000-000000000000" }]
        });
        let u: ProviderUser = serde_json::from_value(json).unwrap();
        assert_eq!(u.identities.unwrap()[0].provider, "github");
    }
}
