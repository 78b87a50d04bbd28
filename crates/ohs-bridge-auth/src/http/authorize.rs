//! Authorization endpoint handler.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::CookieJar;
use cookie::Cookie;

use crate::config::SessionConfig;
use crate::oauth::authorize::{AuthorizationRequest, AuthorizationService, AuthorizeOutcome};

use super::authorize_templates::render_interstitial;
use super::found;

/// State for the authorize handler.
#[derive(Clone)]
pub struct AuthorizeState {
    /// Service running identity recovery and code minting.
    pub authorization_service: Arc<AuthorizationService>,
    /// Session cookie settings; needed to read and clear the cookie.
    pub session_config: SessionConfig,
}

/// GET /openid/authorize/ handler.
///
/// The bridged session is consumed here whatever the outcome shape, so
/// the cookie is removed on every success path.
pub async fn authorize_handler(
    State(state): State<AuthorizeState>,
    Query(params): Query<AuthorizationRequest>,
    jar: CookieJar,
) -> Response {
    let session_token = jar
        .get(&state.session_config.cookie_name)
        .map(|c| c.value().to_string());

    match state
        .authorization_service
        .authorize(&params, session_token.as_deref())
        .await
    {
        Ok(outcome) => {
            let jar = jar.remove(Cookie::from(state.session_config.cookie_name.clone()));
            match outcome {
                AuthorizeOutcome::Redirect(location) => {
                    (jar, found(&location)).into_response()
                }
                AuthorizeOutcome::Interstitial {
                    frame_url,
                    destination_url,
                } => (jar, Html(render_interstitial(&frame_url, &destination_url)))
                    .into_response(),
            }
        }
        Err(err) => err.into_response(),
    }
}
