//! GoTrue-backed identity provider.
//!
//! Exchanges a bearer credential for the provider's user record by calling
//! `GET {base_url}/user` with the credential forwarded as-is.

use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use studio_auth::{Credential, IdentityProvider, ProviderError, ProviderUser};

#[derive(Clone)]
pub struct GoTrueClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl GoTrueClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl IdentityProvider for GoTrueClient {
    async fn exchange(&self, credential: &Credential) -> Result<Option<ProviderUser>, ProviderError> {
        let url = format!("{}/user", self.base_url);

        let mut req = self.http.get(&url).bearer_auth(credential.expose());
        if let Some(key) = &self.api_key {
            req = req.header("apikey", key);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body: Value = resp.json().await.unwrap_or(Value::Null);
            let message = error_message(&body, status);
            debug!(%status, %message, "identity provider rejected credential");
            return Err(ProviderError::Rejected(message));
        }

        resp.json::<Option<ProviderUser>>()
            .await
            .map_err(|e| ProviderError::Transport(format!("invalid user payload: {e}")))
    }
}

/// Pick the human-readable message out of a GoTrue error body.
fn error_message(body: &Value, status: StatusCode) -> String {
    ["msg", "error_description", "message", "error"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.to_string())
        })
}
