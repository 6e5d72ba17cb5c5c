use anyhow::anyhow;

use studio_core::Identity;

/// Per-call context handed to a domain handler by the request wrapper.
///
/// Built fresh for every request and passed by value; handlers never look the
/// caller up again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallContext {
    identity: Option<Identity>,
}

impl CallContext {
    pub fn new(identity: Option<Identity>) -> Self {
        Self { identity }
    }

    /// The authenticated caller, if the route asked for authentication and
    /// the deployment enforces it.
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn require_identity(&self) -> anyhow::Result<&Identity> {
        self.identity
            .as_ref()
            .ok_or_else(|| anyhow!("no authenticated caller for this request"))
    }
}
