//! Axum HTTP handlers for every bridge endpoint.
//!
//! Each endpoint owns a small `State` struct carrying exactly the services
//! and storages it needs, so routers can be assembled per endpoint.

pub mod authorize;
pub mod authorize_templates;
pub mod callback;
pub mod onlogin;
pub mod session_bridge;
pub mod token;
pub mod userinfo;

pub use authorize::{AuthorizeState, authorize_handler};
pub use callback::{CallbackState, callback_handler};
pub use onlogin::{OnLoginState, onlogin_handler};
pub use session_bridge::{SessionBridgeState, session_bridge_handler};
pub use token::{TokenState, token_handler};
pub use userinfo::{UserInfoState, userinfo_handler};

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::error::AuthError;

/// Plain `302 Found` redirect. The legacy site and the platform both
/// expect a literal 302 on these hops.
pub(crate) fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match &self {
            AuthError::InvalidRequest { .. }
            | AuthError::InvalidSignature
            | AuthError::NotificationExpired
            | AuthError::Configuration { .. } => StatusCode::BAD_REQUEST,
            AuthError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AuthError::NotFound { .. } => StatusCode::NOT_FOUND,
            AuthError::Storage { .. } | AuthError::Internal { .. } => {
                error!(category = %self.category(), "Request failed: {self}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = if self.is_server_error() {
            "internal server error".to_string()
        } else {
            self.to_string()
        };
        (status, body).into_response()
    }
}
