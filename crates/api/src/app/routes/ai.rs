use std::sync::Arc;

use axum::{
    Json,
    body::{Body, Bytes},
    extract::Extension,
    http::{HeaderMap, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{error, info};

use studio_ai::{CompletionClient, prompts};

use crate::{
    app::{dto, errors, services::AppServices},
    wrapper::{HandlerResult, WrapOptions},
};

const EDIT_SQL_FAILED: &str = "There was an unknown error editing the SQL snippet. Please try again.";

/// `POST /api/ai/sql/edit`: rewrite a SQL snippet from a natural-language prompt.
pub async fn edit_sql(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    uri: Uri,
    body: Bytes,
) -> Response {
    let completions = services.completions.clone();
    services
        .wrapper
        .wrap(&headers, &uri, WrapOptions::public(), |_ctx| async move {
            let Some(client) = completions else {
                return Ok(errors::missing_openai_key());
            };
            handle_edit_sql(&client, &body).await
        })
        .await
}

async fn handle_edit_sql(client: &CompletionClient, body: &[u8]) -> HandlerResult {
    let request: dto::EditSqlRequest = match serde_json::from_slice(body) {
        Ok(r) => r,
        Err(e) => return Ok(errors::user_error("Invalid request body", json!({ "reason": e.to_string() }))),
    };
    let (Some(prompt), Some(sql)) = (request.prompt, request.sql) else {
        return Ok(errors::user_error("Missing prompt or sql in request data", json!({})));
    };

    let result = match client.edit_sql(&sql, &prompt).await {
        Ok(r) => r,
        Err(e) => {
            error!(error = %e, "AI SQL editing failed");
            return Ok(errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, EDIT_SQL_FAILED));
        }
    };

    if result.sql.is_empty() {
        error!("AI SQL editing failed: Unable to edit SQL for the given prompt");
        return Ok(errors::json_error(
            StatusCode::BAD_REQUEST,
            "Unable to edit SQL. Try adding more details to your prompt.",
        ));
    }

    Ok(Json(result).into_response())
}

/// `POST /api/ai/sql/policy?ref=<project>`: streaming row-level-security
/// policy assistant, restricted to members of the project's organization.
pub async fn policy_chat(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    uri: Uri,
    body: Bytes,
) -> Response {
    let completions = services.completions.clone();
    services
        .wrapper
        .wrap(&headers, &uri, WrapOptions::authenticated(), |ctx| async move {
            let Some(client) = completions else {
                return Ok(errors::missing_openai_key());
            };
            if let Some(identity) = ctx.identity() {
                info!(user_id = %identity.id, "policy assistant request");
            }
            handle_policy_chat(&client, &body).await
        })
        .await
}

async fn handle_policy_chat(client: &CompletionClient, body: &[u8]) -> HandlerResult {
    let request: dto::PolicyChatRequest = match serde_json::from_slice(body) {
        Ok(r) => r,
        Err(e) => return Ok(errors::user_error("Invalid request body", json!({ "reason": e.to_string() }))),
    };
    let Some(history) = request.messages else {
        return Ok(errors::user_error("Missing messages in request data", json!({})));
    };

    let messages = prompts::policy_messages(&history, request.entity_definitions.as_deref());

    let stream = match client
        .stream_chat(prompts::POLICY_MODEL, &messages, prompts::POLICY_MAX_TOKENS)
        .await
    {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "Failed to generate completion");
            return Ok(errors::application_error());
        }
    };

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/event-stream")
        .body(Body::from_stream(stream.into_inner()))?;
    Ok(errors::with_cors(response))
}
