//! Session bridge endpoint handler.
//!
//! Reached only by a server-side redirect from the legacy site after it
//! has already authenticated the member, so a missing account is answered
//! with an honest 404.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use cookie::{Cookie, SameSite};
use tracing::info;

use super::found;

use crate::AuthResult;
use crate::config::{PlatformConfig, SessionConfig};
use crate::error::AuthError;
use crate::request_meta::RequestMeta;
use crate::session::BrowserSession;
use crate::storage::{AccessLogStorage, AccountStorage, SessionStorage};
use ohs_bridge_core::AccessLog;

/// State for the session bridge handler.
#[derive(Clone)]
pub struct SessionBridgeState {
    pub accounts: Arc<dyn AccountStorage>,
    pub access_logs: Arc<dyn AccessLogStorage>,
    pub sessions: Arc<dyn SessionStorage>,
    pub session_config: SessionConfig,
    pub platform: PlatformConfig,
}

/// GET /auth/{unique_id}/ handler.
pub async fn session_bridge_handler(
    State(state): State<SessionBridgeState>,
    Path(unique_id): Path<String>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Response {
    let meta = RequestMeta::from_headers(&headers);
    match bridge(&state, &unique_id, &meta).await {
        Ok((session, location)) => {
            let mut cookie = Cookie::new(state.session_config.cookie_name.clone(), session.token);
            cookie.set_path("/");
            cookie.set_http_only(true);
            cookie.set_same_site(SameSite::Lax);
            cookie.set_secure(state.session_config.secure_cookies);
            (jar.add(cookie), found(&location)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

async fn bridge(
    state: &SessionBridgeState,
    unique_id: &str,
    meta: &RequestMeta,
) -> AuthResult<(BrowserSession, String)> {
    let account = state
        .accounts
        .find_by_unique_id(unique_id)
        .await?
        .filter(|a| a.is_active)
        .ok_or_else(|| AuthError::not_found("account not found"))?;

    state
        .access_logs
        .append(&AccessLog::success(
            account.id,
            meta.client_ip.clone(),
            meta.user_agent.clone(),
        ))
        .await?;

    let lifetime = time::Duration::seconds(state.session_config.lifetime.as_secs() as i64);
    let session = BrowserSession::establish(&account, lifetime);
    // The session must be resolvable before the browser follows the
    // redirect; persist first, redirect second.
    state.sessions.put(&session).await?;

    let location = state
        .platform
        .login_url(&account.subaccount_id, &account.unique_id);
    info!(
        unique_id = %account.unique_id,
        subaccount = %account.subaccount_id,
        "Session bridged, redirecting to platform login"
    );
    Ok((session, location))
}
