use axum::{
    Router,
    routing::{get, post},
};

pub mod ai;
pub mod system;

/// Router for all wrapped endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/api/profile", get(system::profile))
        .route("/api/ai/sql/edit", post(ai::edit_sql))
        .route("/api/ai/sql/policy", post(ai::policy_chat))
}
