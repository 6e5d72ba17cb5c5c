use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Value, json};

pub const ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// `{ "error": <body> }` with the given status.
pub fn json_error_body(status: StatusCode, body: impl Serialize) -> Response {
    (status, axum::Json(json!({ "error": body }))).into_response()
}

/// `{ "error": "<message>" }` with the given status.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    json_error_body(status, message.into())
}

/// Client mistake: `400 { "error": message, "data": data }`.
pub fn user_error(message: impl Into<String>, data: Value) -> Response {
    with_cors(
        (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({ "error": message.into(), "data": data })),
        )
            .into_response(),
    )
}

/// Opaque failure while talking to the LLM provider.
pub fn application_error() -> Response {
    with_cors(json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "There was an error processing your request",
    ))
}

pub fn missing_openai_key() -> Response {
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "No OPENAI_KEY set. Create this environment variable to use AI features.",
    )
}

/// Permissive CORS headers used by the AI endpoints.
pub fn with_cors(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    response
}
