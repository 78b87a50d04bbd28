//! Login notification endpoint handler.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::ingest::LoginService;
use crate::request_meta::RequestMeta;

/// State for the login notification handler.
#[derive(Clone)]
pub struct OnLoginState {
    /// Ingestion service absorbing notifications.
    pub login_service: LoginService,
}

/// POST /onlogin/ handler.
///
/// The legacy site treats anything other than a 200 as a delivery failure
/// and retries; every error here is a 400 carrying the reason so the
/// sending side can log it.
pub async fn onlogin_handler(
    State(state): State<OnLoginState>,
    headers: HeaderMap,
    Json(payload): Json<serde_json::Value>,
) -> Response {
    let meta = RequestMeta::from_headers(&headers);
    match state.login_service.process(&payload, &meta).await {
        Ok(_) => (StatusCode::OK, "OK").into_response(),
        Err(err) => {
            warn!(category = %err.category(), "Login notification rejected: {err}");
            (StatusCode::BAD_REQUEST, err.to_string()).into_response()
        }
    }
}
