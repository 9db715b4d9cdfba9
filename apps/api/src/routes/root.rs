//! Greeting and health routes.

use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{json, Value};
use tracing::warn;

use crate::extract::Path;
use crate::state::AppState;

/// `GET /`
pub async fn index() -> axum::Json<Value> {
    axum::Json(json!({ "message": "Hello World! Welcome to Levy" }))
}

/// `GET /hello/{name}`
pub async fn hello(Path(name): Path<String>) -> axum::Json<Value> {
    axum::Json(json!({ "message": format!("Hello {name}") }))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the database is unreachable or its
/// schema is behind.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.db().migration_status().await {
        Ok((total, applied)) if applied >= total => StatusCode::OK,
        Ok((total, applied)) => {
            warn!(total, applied, "Database has pending migrations");
            StatusCode::SERVICE_UNAVAILABLE
        }
        Err(e) => {
            warn!(error = %e, "Database not ready");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
