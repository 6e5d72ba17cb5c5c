//! Resource scope named by a request (organization slug / project ref).

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// URL slug of an organization (`?slug=`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrgSlug(String);

/// Reference of a project (`?ref=`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectRef(String);

macro_rules! impl_scope_key {
    ($t:ty, $name:literal) => {
        impl $t {
            pub fn new(value: impl Into<String>) -> DomainResult<Self> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(DomainError::validation(concat!($name, " must not be empty")));
                }
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

impl_scope_key!(OrgSlug, "organization slug");
impl_scope_key!(ProjectRef, "project ref");

/// Organization/project context extracted from query parameters.
///
/// Both keys may be present; the organization slug takes precedence when the
/// scope is resolved to an organization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceScope {
    pub org_slug: Option<OrgSlug>,
    pub project_ref: Option<ProjectRef>,
}

/// The single key a scope resolves through, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeTarget<'a> {
    Organization(&'a OrgSlug),
    Project(&'a ProjectRef),
}

impl ResourceScope {
    /// Build a scope from raw query values. Empty values count as absent.
    pub fn from_query(slug: Option<&str>, project_ref: Option<&str>) -> Self {
        Self {
            org_slug: slug.and_then(|s| OrgSlug::new(s).ok()),
            project_ref: project_ref.and_then(|r| ProjectRef::new(r).ok()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.org_slug.is_none() && self.project_ref.is_none()
    }

    pub fn target(&self) -> Option<ScopeTarget<'_>> {
        if let Some(slug) = &self.org_slug {
            return Some(ScopeTarget::Organization(slug));
        }
        self.project_ref.as_ref().map(ScopeTarget::Project)
    }
}
