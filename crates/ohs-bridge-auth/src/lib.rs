//! # ohs-bridge-auth
//!
//! Authentication and authorization core for the OHS Bridge SSO service.
//!
//! This crate provides:
//! - Signature-based trust establishment for inbound login notifications
//! - The browser session bridge between the legacy site and the platform
//! - The OAuth 2.0 authorization-code/access-token lifecycle consumed by
//!   the Bridge learning platform (authorize, token, userinfo)
//! - The legacy signed-token callback path
//!
//! ## Overview
//!
//! The legacy membership site authenticates users first and pushes signed
//! login notifications; this crate absorbs them, carries the identity across
//! the cross-domain redirect dance, and answers "who is this user" to the
//! downstream platform through a deliberately small OIDC subset.
//!
//! ## Modules
//!
//! - [`config`] - Auth configuration (TTLs, platform URL conventions)
//! - [`signature`] - Keyed signature codec and opaque token format
//! - [`ingest`] - Login notification ingestion
//! - [`oauth`] - Authorization, token exchange and tenant resolution
//! - [`session`] - Browser session records
//! - [`storage`] - Storage traits for auth-related data
//! - [`http`] - Axum HTTP handlers for all endpoints

pub mod config;
pub mod error;
pub mod http;
pub mod ingest;
pub mod oauth;
pub mod request_meta;
pub mod session;
pub mod signature;
pub mod storage;
pub mod types;

pub use config::{AuthConfig, PlatformConfig, SessionConfig};
pub use error::{AuthError, ErrorCategory};
pub use http::{
    AuthorizeState, CallbackState, OnLoginState, SessionBridgeState, TokenState, UserInfoState,
    authorize_handler, callback_handler, onlogin_handler, session_bridge_handler, token_handler,
    userinfo_handler,
};
pub use ingest::{LoginNotification, LoginService};
pub use oauth::{
    AuthorizationRequest, AuthorizationService, AuthorizeOutcome, StateParam,
    SuffixTenantResolver, TenantResolver, TokenResponse, TokenService,
};
pub use session::BrowserSession;
pub use signature::{FieldMap, SignatureError};
pub use storage::{
    AccessLogStorage, AccessTokenStorage, AccountStorage, AuthorizationCodeStorage,
    ClientStorage, NoopCache, SessionStorage, SideCache, SyncTaskStorage,
};
pub use types::{AccessToken, AuthClient, AuthorizationCode};

/// Type alias for authentication/authorization results.
pub type AuthResult<T> = Result<T, AuthError>;
