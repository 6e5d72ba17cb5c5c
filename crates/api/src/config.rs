//! Process configuration, read once from the environment at startup.

use std::net::SocketAddr;

use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

/// How gate failures map to HTTP status codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Every failure is a 500 (historical behaviour).
    #[default]
    Uniform,
    /// 401 for unidentified callers, 403 for missing membership, 500 otherwise.
    Distinct,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Hosted platform build; self-hosted deployments never authenticate.
    pub is_platform: bool,
    pub gotrue_url: Option<String>,
    pub gotrue_api_key: Option<String>,
    pub read_only_database_url: Option<String>,
    pub openai_key: Option<String>,
    pub openai_base_url: String,
    pub status_policy: StatusPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let bind_addr = match get("STUDIO_BIND_ADDR") {
            Some(v) => v.parse::<SocketAddr>().map_err(|_| ConfigError::Invalid {
                var: "STUDIO_BIND_ADDR",
                value: v.clone(),
            })?,
            None => SocketAddr::from(([0, 0, 0, 0], 8080)),
        };

        let is_platform = match get("NEXT_PUBLIC_IS_PLATFORM").as_deref() {
            None | Some("false") | Some("0") => false,
            Some("true") | Some("1") => true,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "NEXT_PUBLIC_IS_PLATFORM",
                    value: other.to_string(),
                });
            }
        };

        let status_policy = match get("STUDIO_AUTH_STATUS").as_deref() {
            None | Some("uniform") => StatusPolicy::Uniform,
            Some("distinct") => StatusPolicy::Distinct,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "STUDIO_AUTH_STATUS",
                    value: other.to_string(),
                });
            }
        };

        let gotrue_url = get("GOTRUE_URL");
        if is_platform && gotrue_url.is_none() {
            return Err(ConfigError::Missing("GOTRUE_URL"));
        }

        let openai_key = get("OPENAI_KEY");
        if openai_key.is_none() {
            warn!("OPENAI_KEY not set; AI routes will answer with a configuration error");
        }

        Ok(Self {
            bind_addr,
            is_platform,
            gotrue_url,
            gotrue_api_key: get("GOTRUE_API_KEY"),
            read_only_database_url: get("READ_ONLY_DATABASE_URL"),
            openai_key,
            openai_base_url: get("OPENAI_BASE_URL").unwrap_or_else(|| studio_ai::DEFAULT_BASE_URL.to_string()),
            status_policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults_are_self_hosted_and_uniform() {
        let c = config(&[]).unwrap();
        assert!(!c.is_platform);
        assert_eq!(c.status_policy, StatusPolicy::Uniform);
        assert_eq!(c.bind_addr.port(), 8080);
        assert_eq!(c.openai_base_url, studio_ai::DEFAULT_BASE_URL);
    }

    #[test]
    fn platform_requires_identity_provider() {
        assert_eq!(
            config(&[("NEXT_PUBLIC_IS_PLATFORM", "true")]),
            Err(ConfigError::Missing("GOTRUE_URL"))
        );
        let c = config(&[
            ("NEXT_PUBLIC_IS_PLATFORM", "true"),
            ("GOTRUE_URL", "http://localhost:9999"),
            ("STUDIO_AUTH_STATUS", "distinct"),
        ])
        .unwrap();
        assert!(c.is_platform);
        assert_eq!(c.status_policy, StatusPolicy::Distinct);
    }

    #[test]
    fn rejects_unknown_values() {
        assert!(matches!(
            config(&[("STUDIO_AUTH_STATUS", "strict")]),
            Err(ConfigError::Invalid { var: "STUDIO_AUTH_STATUS", .. })
        ));
        assert!(matches!(
            config(&[("STUDIO_BIND_ADDR", "nowhere")]),
            Err(ConfigError::Invalid { var: "STUDIO_BIND_ADDR", .. })
        ));
    }

    #[test]
    fn empty_values_are_unset() {
        let c = config(&[("OPENAI_KEY", ""), ("READ_ONLY_DATABASE_URL", " ")]).unwrap();
        assert_eq!(c.openai_key, None);
        assert_eq!(c.read_only_database_url, None);
    }
}
