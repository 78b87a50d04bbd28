//! UserInfo endpoint handler.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use time::OffsetDateTime;

use crate::AuthResult;
use crate::error::AuthError;
use crate::storage::{AccessTokenStorage, AccountStorage};

/// State for the userinfo handler.
#[derive(Clone)]
pub struct UserInfoState {
    pub tokens: Arc<dyn AccessTokenStorage>,
    pub accounts: Arc<dyn AccountStorage>,
}

/// Claims returned for a valid bearer token.
///
/// `sub` and `uid` both carry the external unique id; the platform keys
/// its user records on `uid`.
#[derive(Debug, Serialize)]
pub struct UserInfoClaims {
    pub uid: String,
    pub email: String,
    pub first_name: String,
    pub family_name: String,
    pub sub: String,
}

/// GET /openid/userinfo/ handler.
pub async fn userinfo_handler(
    State(state): State<UserInfoState>,
    headers: HeaderMap,
) -> Response {
    match claims_for_request(&state, &headers).await {
        Ok(claims) => Json(claims).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn claims_for_request(
    state: &UserInfoState,
    headers: &HeaderMap,
) -> AuthResult<UserInfoClaims> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AuthError::forbidden("invalid authorization header"))?;

    let token = state
        .tokens
        .find_valid(bearer, OffsetDateTime::now_utc())
        .await?
        .ok_or_else(|| AuthError::forbidden("invalid or expired token"))?;

    let account = state
        .accounts
        .find_by_id(token.account_id)
        .await?
        .ok_or_else(|| AuthError::forbidden("invalid or expired token"))?;

    Ok(UserInfoClaims {
        uid: account.unique_id.clone(),
        email: account.email,
        first_name: account.first_name,
        family_name: account.last_name,
        sub: account.unique_id,
    })
}
