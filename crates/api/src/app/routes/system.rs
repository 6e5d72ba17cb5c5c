use std::sync::Arc;

use axum::{
    Json,
    extract::Extension,
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
};

use crate::{app::services::AppServices, wrapper::WrapOptions};

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// The authenticated caller, optionally scoped by `?slug=` / `?ref=`.
pub async fn profile(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    services
        .wrapper
        .wrap(&headers, &uri, WrapOptions::authenticated(), |ctx| async move {
            let identity = ctx.require_identity()?;
            Ok(Json(identity).into_response())
        })
        .await
}
