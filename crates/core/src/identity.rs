//! Resolved application-level user record.

use serde::{Deserialize, Serialize};

use crate::{GotrueId, UserId};

/// The caller of a request, resolved from a bearer credential.
///
/// Only produced by the authentication gate after a successful exchange with
/// the identity provider and a users-table lookup. Request-scoped: it is never
/// cached across requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub gotrue_id: GotrueId,
    /// Legacy external-provider identifier (e.g. `github|123`).
    pub auth0_id: Option<String>,
    pub primary_email: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub mobile: Option<String>,
    #[serde(default)]
    pub is_alpha_user: bool,
}
