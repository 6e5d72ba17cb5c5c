//! HTTP client for the chat-completions API of the LLM provider.

use bytes::Bytes;
use futures_util::{StreamExt, TryStreamExt, stream::BoxStream};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::{
    ChatMessage, CompletionError, EditSqlResult,
    prompts::{self, EDIT_SQL_FUNCTION},
};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    functions: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    function_call: Option<Value>,
}

/// Raw server-sent-event body of a streaming completion, relayed unparsed.
pub struct CompletionStream {
    inner: BoxStream<'static, Result<Bytes, CompletionError>>,
}

impl CompletionStream {
    pub fn into_inner(self) -> BoxStream<'static, Result<Bytes, CompletionError>> {
        self.inner
    }
}

#[derive(Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl CompletionClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Start a streaming completion (`temperature 0`).
    pub async fn stream_chat(
        &self,
        model: &str,
        messages: &[ChatMessage],
        max_tokens: u32,
    ) -> Result<CompletionStream, CompletionError> {
        let request = ChatCompletionRequest {
            model,
            messages,
            max_tokens,
            temperature: 0.0,
            stream: true,
            functions: None,
            function_call: None,
        };

        let resp = self.post(&request).await?;
        let inner = resp.bytes_stream().map_err(CompletionError::from).boxed();
        Ok(CompletionStream { inner })
    }

    /// Ask the model to rewrite `sql` according to `prompt` via a forced
    /// `editSql` function call.
    pub async fn edit_sql(&self, sql: &str, prompt: &str) -> Result<EditSqlResult, CompletionError> {
        let messages = prompts::edit_sql_messages(sql, prompt);
        let request = ChatCompletionRequest {
            model: prompts::EDIT_SQL_MODEL,
            messages: &messages,
            max_tokens: prompts::EDIT_SQL_MAX_TOKENS,
            temperature: 0.0,
            stream: false,
            functions: Some(vec![prompts::edit_sql_function()]),
            function_call: Some(serde_json::json!({ "name": EDIT_SQL_FUNCTION })),
        };

        let body: Value = self.post(&request).await?.json().await?;
        parse_function_arguments(&body)
    }

    async fn post(&self, request: &ChatCompletionRequest<'_>) -> Result<reqwest::Response, CompletionError> {
        debug!(model = request.model, stream = request.stream, messages = request.messages.len(), "completion request");

        let resp = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body: Value = resp.json().await.unwrap_or(Value::Null);
        let message = body["error"]["message"]
            .as_str()
            .unwrap_or("unknown error")
            .to_string();
        error!(%status, %message, "completion request failed");
        Err(CompletionError::Upstream {
            status: status.as_u16(),
            message,
        })
    }
}

fn parse_function_arguments(body: &Value) -> Result<EditSqlResult, CompletionError> {
    let arguments = body["choices"][0]["message"]["function_call"]["arguments"]
        .as_str()
        .ok_or_else(|| CompletionError::MalformedResponse("missing function_call arguments".into()))?;

    serde_json::from_str(arguments)
        .map_err(|e| CompletionError::MalformedResponse(format!("invalid function_call arguments: {e}")))
}
