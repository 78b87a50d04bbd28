//! Legacy signed-token callback handler.
//!
//! Older platform configurations bounce the browser back through
//! `/bridge/callback/` with a base64-wrapped signed token instead of
//! running the code exchange. The token wraps the same querystring codec
//! used everywhere else.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use tracing::{info, warn};

use super::found;
use crate::AuthResult;
use crate::config::PlatformConfig;
use crate::error::AuthError;
use crate::request_meta::RequestMeta;
use crate::signature;
use crate::storage::{AccessLogStorage, AccountStorage, ClientStorage};
use ohs_bridge_core::AccessLog;

/// State for the legacy callback handler.
#[derive(Clone)]
pub struct CallbackState {
    pub clients: Arc<dyn ClientStorage>,
    pub accounts: Arc<dyn AccountStorage>,
    pub access_logs: Arc<dyn AccessLogStorage>,
    pub platform: PlatformConfig,
}

/// Query parameters of the callback request.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    pub token: String,
}

/// GET /bridge/callback/ handler.
///
/// This URL is reachable from the open internet, so an unknown account is
/// a 403 rather than a 404; the endpoint never confirms which accounts
/// exist.
pub async fn callback_handler(
    State(state): State<CallbackState>,
    Query(params): Query<CallbackParams>,
    headers: HeaderMap,
) -> Response {
    let meta = RequestMeta::from_headers(&headers);
    match follow_callback(&state, &params.token, &meta).await {
        Ok(location) => found(&location).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn follow_callback(
    state: &CallbackState,
    token: &str,
    meta: &RequestMeta,
) -> AuthResult<String> {
    if token.is_empty() {
        return Err(AuthError::invalid_request("missing token"));
    }

    // The legacy site wraps the signed querystring with standard-alphabet
    // base64, not the url-safe variant.
    let decoded = STANDARD
        .decode(token)
        .map_err(|_| AuthError::invalid_request("malformed token"))?;
    let decoded = String::from_utf8(decoded)
        .map_err(|_| AuthError::invalid_request("malformed token"))?;

    let client = state
        .clients
        .find_active()
        .await?
        .ok_or_else(|| AuthError::configuration("no active client configured"))?;

    let fields = signature::decode_token(&decoded, &client.client_secret).map_err(|e| {
        warn!("Callback token failed verification: {e}");
        AuthError::invalid_request("invalid token")
    })?;

    let user_id = fields
        .get("user_id")
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AuthError::invalid_request("invalid token"))?;

    let account = state
        .accounts
        .find_by_unique_id(user_id)
        .await?
        .filter(|a| a.is_active)
        .ok_or_else(|| AuthError::forbidden("access denied"))?;

    state
        .access_logs
        .append(&AccessLog::success(
            account.id,
            meta.client_ip.clone(),
            meta.user_agent.clone(),
        ))
        .await?;

    info!(
        unique_id = %account.unique_id,
        subaccount = %account.subaccount_id,
        "Legacy callback accepted"
    );
    Ok(state.platform.courses_url(&account.subaccount_id))
}
