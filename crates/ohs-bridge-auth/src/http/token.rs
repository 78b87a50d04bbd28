//! Token endpoint handler.

use std::sync::Arc;

use axum::Form;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::error::AuthError;
use crate::oauth::token::{TokenService, parse_basic_credentials};

/// State for the token handler.
#[derive(Clone)]
pub struct TokenState {
    pub token_service: Arc<TokenService>,
}

/// Form body of the token request.
#[derive(Debug, Deserialize)]
pub struct TokenRequestForm {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub grant_type: Option<String>,
}

/// POST /openid/token/ handler.
///
/// A missing header or code is a malformed request (400); anything wrong
/// with the credentials or the code itself is a 403.
pub async fn token_handler(
    State(state): State<TokenState>,
    headers: HeaderMap,
    Form(form): Form<TokenRequestForm>,
) -> Response {
    let Some(authorization) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    else {
        return AuthError::invalid_request("missing authorization header").into_response();
    };
    if form.code.is_empty() {
        return AuthError::invalid_request("missing code").into_response();
    }

    let (client_id, client_secret) = match parse_basic_credentials(authorization) {
        Ok(credentials) => credentials,
        Err(err) => return err.into_response(),
    };

    match state
        .token_service
        .exchange(&client_id, &client_secret, &form.code)
        .await
    {
        Ok(response) => (
            StatusCode::OK,
            [(header::CACHE_CONTROL, "no-store")],
            axum::Json(response),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}
