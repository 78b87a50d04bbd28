//! Router assembly and server lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use ohs_bridge_auth::oauth::{AuthorizationService, SuffixTenantResolver, TokenService};
use ohs_bridge_auth::storage::{
    AccessLogStorage, AccessTokenStorage, AccountStorage, AuthorizationCodeStorage,
    ClientStorage, NoopCache, SessionStorage, SideCache, SyncTaskStorage,
};
use ohs_bridge_auth::{
    AuthorizeState, CallbackState, LoginService, OnLoginState, SessionBridgeState, TokenState,
    UserInfoState, authorize_handler, callback_handler, onlogin_handler, session_bridge_handler,
    token_handler, userinfo_handler,
};
use ohs_bridge_auth_memory::{
    InMemoryAccessLogStorage, InMemoryAccessTokenStorage, InMemoryAccountStorage,
    InMemoryAuthorizationCodeStorage, InMemoryClientStorage, InMemorySessionStorage,
    InMemorySyncTaskStorage,
};

use crate::{config::AppConfig, handlers, middleware as app_middleware};

/// Shared storage handles behind the HTTP layer.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountStorage>,
    pub clients: Arc<dyn ClientStorage>,
    pub codes: Arc<dyn AuthorizationCodeStorage>,
    pub tokens: Arc<dyn AccessTokenStorage>,
    pub sessions: Arc<dyn SessionStorage>,
    pub access_logs: Arc<dyn AccessLogStorage>,
    pub sync_tasks: Arc<dyn SyncTaskStorage>,
    pub cache: Arc<dyn SideCache>,
}

impl AppState {
    /// Builds a state backed entirely by in-memory stores.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            accounts: Arc::new(InMemoryAccountStorage::new()),
            clients: Arc::new(InMemoryClientStorage::new()),
            codes: Arc::new(InMemoryAuthorizationCodeStorage::new()),
            tokens: Arc::new(InMemoryAccessTokenStorage::new()),
            sessions: Arc::new(InMemorySessionStorage::new()),
            access_logs: Arc::new(InMemoryAccessLogStorage::new()),
            sync_tasks: Arc::new(InMemorySyncTaskStorage::new()),
            cache: Arc::new(NoopCache),
        }
    }
}

/// Assembles the full application router.
pub fn build_app(cfg: &AppConfig, state: &AppState) -> anyhow::Result<Router> {
    let auth = cfg.auth.clone();

    let login_service = LoginService::new(
        state.clients.clone(),
        state.accounts.clone(),
        state.access_logs.clone(),
        state.sync_tasks.clone(),
        state.cache.clone(),
        auth.login_freshness_window,
    );

    let tenant_resolver = Arc::new(SuffixTenantResolver::new(
        &auth.platform.domain,
        auth.platform.tenant_suffix.clone(),
    )?);
    let authorization_service = Arc::new(AuthorizationService::new(
        state.accounts.clone(),
        state.clients.clone(),
        state.codes.clone(),
        state.sessions.clone(),
        tenant_resolver,
        auth.clone(),
    ));
    let token_service = Arc::new(TokenService::new(
        state.clients.clone(),
        state.codes.clone(),
        state.tokens.clone(),
        auth.access_token_lifetime,
    ));

    let onlogin = Router::new()
        .route("/onlogin/", post(onlogin_handler))
        .with_state(OnLoginState { login_service });

    let session_bridge = Router::new()
        .route("/auth/{unique_id}/", get(session_bridge_handler))
        .with_state(SessionBridgeState {
            accounts: state.accounts.clone(),
            access_logs: state.access_logs.clone(),
            sessions: state.sessions.clone(),
            session_config: auth.session.clone(),
            platform: auth.platform.clone(),
        });

    let authorize = Router::new()
        .route("/openid/authorize/", get(authorize_handler))
        .with_state(AuthorizeState {
            authorization_service,
            session_config: auth.session.clone(),
        });

    let token = Router::new()
        .route("/openid/token/", post(token_handler))
        .with_state(TokenState { token_service });

    let userinfo = Router::new()
        .route("/openid/userinfo/", get(userinfo_handler))
        .with_state(UserInfoState {
            tokens: state.tokens.clone(),
            accounts: state.accounts.clone(),
        });

    let callback = Router::new()
        .route("/bridge/callback/", get(callback_handler))
        .with_state(CallbackState {
            clients: state.clients.clone(),
            accounts: state.accounts.clone(),
            access_logs: state.access_logs.clone(),
            platform: auth.platform.clone(),
        });

    let app = Router::new()
        .route("/", get(handlers::root))
        .route("/health/", get(handlers::health))
        .merge(onlogin)
        .merge(session_bridge)
        .merge(authorize)
        .merge(token)
        .merge(userinfo)
        .merge(callback)
        .layer(middleware::from_fn(app_middleware::request_id))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

pub struct OhsBridgeServer {
    addr: SocketAddr,
    app: Router,
}

pub struct ServerBuilder {
    config: AppConfig,
    state: AppState,
}

impl ServerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            state: AppState::in_memory(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, cfg: AppConfig) -> Self {
        self.config = cfg;
        self
    }

    #[must_use]
    pub fn with_state(mut self, state: AppState) -> Self {
        self.state = state;
        self
    }

    pub fn build(self) -> anyhow::Result<OhsBridgeServer> {
        let app = build_app(&self.config, &self.state)?;
        Ok(OhsBridgeServer {
            addr: self.config.addr(),
            app,
        })
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OhsBridgeServer {
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        tracing::info!("listening on {}", self.addr);
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
