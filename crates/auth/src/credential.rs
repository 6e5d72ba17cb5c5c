//! Bearer credential extraction.

use studio_core::ResourceScope;

use crate::AuthError;

/// Opaque bearer token presented by a client.
///
/// `Debug` is redacted so the token never ends up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Extract the token from an `authorization` header value.
    ///
    /// Accepts `Bearer <token>` (scheme is case-insensitive) or a bare token.
    pub fn from_authorization(header: Option<&str>) -> Result<Self, AuthError> {
        let header = header.ok_or(AuthError::MissingCredential)?.trim();

        // `Bearer` with nothing after it is the scheme alone, not a bare token.
        let token = match header.split_once(char::is_whitespace) {
            Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
            None if header.eq_ignore_ascii_case("bearer") => "",
            _ => header,
        };

        if token.is_empty() {
            return Err(AuthError::MissingCredential);
        }

        Ok(Self(token.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Debug for Credential {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// The parts of an inbound request the gate looks at.
///
/// Transport-agnostic: the HTTP layer fills it from headers and query string.
#[derive(Debug, Clone, Default)]
pub struct AuthRequest {
    /// Raw `authorization` header value, if any.
    pub authorization: Option<String>,
    pub scope: ResourceScope,
}

impl AuthRequest {
    pub fn new(authorization: Option<String>, scope: ResourceScope) -> Self {
        Self { authorization, scope }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bearer_scheme() {
        let c = Credential::from_authorization(Some("Bearer tok123")).unwrap();
        assert_eq!(c.expose(), "tok123");
        let c = Credential::from_authorization(Some("bearer   tok123 ")).unwrap();
        assert_eq!(c.expose(), "tok123");
    }

    #[test]
    fn bare_token_is_accepted() {
        let c = Credential::from_authorization(Some("tok123")).unwrap();
        assert_eq!(c.expose(), "tok123");
    }

    #[test]
    fn missing_or_empty_is_rejected() {
        assert_eq!(Credential::from_authorization(None), Err(AuthError::MissingCredential));
        assert_eq!(Credential::from_authorization(Some("")), Err(AuthError::MissingCredential));
        assert_eq!(Credential::from_authorization(Some("Bearer ")), Err(AuthError::MissingCredential));
        assert_eq!(Credential::from_authorization(Some("Bearer")), Err(AuthError::MissingCredential));
        assert_eq!(Credential::from_authorization(Some("  bearer\t ")), Err(AuthError::MissingCredential));
    }

    #[test]
    fn tab_separated_scheme_is_stripped() {
        let c = Credential::from_authorization(Some("Bearer\ttok123")).unwrap();
        assert_eq!(c.expose(), "tok123");
    }

    #[test]
    fn debug_is_redacted() {
        let c = Credential::from_authorization(Some("Bearer secret")).unwrap();
        assert!(!format!("{c:?}").contains("secret"));
    }
}
