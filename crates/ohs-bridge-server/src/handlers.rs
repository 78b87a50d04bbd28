//! Service metadata and health handlers.

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn root() -> impl IntoResponse {
    let body = json!({
        "service": "OHS Bridge",
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, Json(body))
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
