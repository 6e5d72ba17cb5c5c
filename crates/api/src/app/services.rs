use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use studio_ai::CompletionClient;
use studio_auth::{AuthGate, ReadOnlyDataStore};
use studio_infra::{GoTrueClient, InMemoryReadStore, PostgresReadStore};

use crate::{
    config::{Config, ConfigError},
    wrapper::{AuthMode, RequestWrapper},
};

/// Shared, read-only collaborators of every request.
#[derive(Clone)]
pub struct AppServices {
    pub wrapper: RequestWrapper,
    /// `None` when no LLM key is configured.
    pub completions: Option<CompletionClient>,
}

/// Wire collaborators from configuration.
pub fn build_services(config: &Config) -> anyhow::Result<AppServices> {
    let http = reqwest::Client::builder()
        .user_agent(concat!("studio-api/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to build http client")?;

    let auth = if config.is_platform {
        let gotrue_url = config
            .gotrue_url
            .clone()
            .ok_or(ConfigError::Missing("GOTRUE_URL"))?;
        let provider = Arc::new(GoTrueClient::new(http.clone(), gotrue_url, config.gotrue_api_key.clone()));

        let store: Arc<dyn ReadOnlyDataStore> = match &config.read_only_database_url {
            Some(url) => Arc::new(PostgresReadStore::connect_lazy(url)?),
            None => {
                warn!("READ_ONLY_DATABASE_URL not set; using an empty in-memory store (every lookup misses)");
                Arc::new(InMemoryReadStore::new())
            }
        };

        info!("platform mode: authenticated routes enforce membership");
        AuthMode::Platform(AuthGate::new(provider, store))
    } else {
        info!("self-hosted mode: authentication disabled");
        AuthMode::SelfHosted
    };

    let completions = config
        .openai_key
        .as_ref()
        .map(|key| CompletionClient::new(http.clone(), config.openai_base_url.clone(), key.clone()));

    Ok(AppServices {
        wrapper: RequestWrapper::new(auth, config.status_policy),
        completions,
    })
}
