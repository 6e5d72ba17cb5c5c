use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of the authentication gate.
///
/// The `Display` text is the client-visible message carried in the
/// `{ "message": ... }` body; the variant is for logging and status mapping.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing access token")]
    MissingCredential,

    /// The identity provider rejected the credential (message passed through).
    #[error("{0}")]
    IdentityProviderError(String),

    #[error("The user does not exist")]
    UserNotFound,

    #[error("User organization does not exist")]
    ResourceNotFound,

    #[error("The user does not have permission")]
    PermissionDenied,
}

/// Coarse classification used when mapping gate failures to transport codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthErrorKind {
    /// The caller could not be identified.
    Unauthenticated,
    /// The caller is known but may not act on the named resource.
    Forbidden,
}

impl AuthError {
    pub fn kind(&self) -> AuthErrorKind {
        match self {
            AuthError::MissingCredential
            | AuthError::IdentityProviderError(_)
            | AuthError::UserNotFound => AuthErrorKind::Unauthenticated,
            AuthError::ResourceNotFound | AuthError::PermissionDenied => AuthErrorKind::Forbidden,
        }
    }

    /// Stable name of the variant, for structured logs.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "missing_credential",
            AuthError::IdentityProviderError(_) => "identity_provider_error",
            AuthError::UserNotFound => "user_not_found",
            AuthError::ResourceNotFound => "resource_not_found",
            AuthError::PermissionDenied => "permission_denied",
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            message: self.to_string(),
        }
    }
}

/// Normalized failure shape: `{ "message": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_carries_display_text() {
        let body = AuthError::IdentityProviderError("invalid JWT".into()).body();
        assert_eq!(serde_json::to_value(&body).unwrap(), serde_json::json!({ "message": "invalid JWT" }));
    }

    #[test]
    fn kinds_split_identity_from_permission() {
        assert_eq!(AuthError::MissingCredential.kind(), AuthErrorKind::Unauthenticated);
        assert_eq!(AuthError::UserNotFound.kind(), AuthErrorKind::Unauthenticated);
        assert_eq!(AuthError::ResourceNotFound.kind(), AuthErrorKind::Forbidden);
        assert_eq!(AuthError::PermissionDenied.kind(), AuthErrorKind::Forbidden);
    }
}
