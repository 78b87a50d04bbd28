//! Authorization endpoint flow.
//!
//! Identity is recovered from whatever the redirect preserved: the bridged
//! session cookie when it survived the cross-origin hop, or the `state`
//! parameter the login page echoed back. The resolvers run in a fixed
//! order and the first hit wins.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::AuthResult;
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::oauth::tenant::TenantResolver;
use crate::session::BrowserSession;
use crate::storage::{
    AccountStorage, AuthorizationCodeStorage, ClientStorage, SessionStorage,
};
use crate::types::AuthorizationCode;
use ohs_bridge_core::Account;

/// Query parameters of the authorization request.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorizationRequest {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub redirect_uri: String,
    #[serde(default)]
    pub state: String,
}

impl AuthorizationRequest {
    fn validate(&self) -> AuthResult<()> {
        if self.client_id.is_empty() {
            return Err(AuthError::invalid_request("missing client_id"));
        }
        if self.redirect_uri.is_empty() {
            return Err(AuthError::invalid_request("missing redirect_uri"));
        }
        if self.state.is_empty() {
            return Err(AuthError::invalid_request("missing state"));
        }
        Ok(())
    }
}

/// Parsed form of the `state` parameter.
///
/// Two shapes arrive in practice: `<path>|<identifier>` from the login
/// page continuation, and a bare value that may itself be an account
/// identifier planted by the session bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateParam {
    /// The value exactly as received, echoed back to the client.
    pub raw: String,
    /// Landing path for the interstitial continuation, when present.
    pub path: Option<String>,
    /// Candidate account identifier, when one looks plausible.
    pub identifier: Option<String>,
}

impl StateParam {
    /// Parses a raw `state` value.
    ///
    /// The value is percent-decoded once more because the login page
    /// re-encodes the hint it was handed.
    #[must_use]
    pub fn parse(raw: &str, min_identifier_length: usize) -> Self {
        let decoded = urlencoding::decode(raw)
            .map(|c| c.into_owned())
            .unwrap_or_else(|_| raw.to_string());

        if let Some((left, right)) = decoded.split_once('|') {
            let path = left.starts_with('/').then(|| left.to_string());
            // The pipe form is deliberate; whatever follows the pipe is an
            // identifier, however short.
            let identifier = (!right.is_empty()).then(|| right.to_string());
            Self {
                raw: raw.to_string(),
                path,
                identifier,
            }
        } else {
            let identifier = looks_like_identifier(&decoded, min_identifier_length)
                .then_some(decoded);
            Self {
                raw: raw.to_string(),
                path: None,
                identifier,
            }
        }
    }
}

/// Whether a bare state value plausibly names an account.
///
/// Only applied to the bare form, where the value may just be a CSRF
/// nonce. Emails always qualify; anything longer than the configured
/// minimum is taken to be an external unique id.
fn looks_like_identifier(value: &str, min_length: usize) -> bool {
    !value.is_empty() && (value.contains('@') || value.len() > min_length)
}

/// Result of a successful authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizeOutcome {
    /// Plain `302` to the client's redirect URI.
    Redirect(String),
    /// HTML page that completes the code delivery in a hidden iframe
    /// while navigating the visible window to the tenant landing page.
    Interstitial {
        frame_url: String,
        destination_url: String,
    },
}

/// Service driving the authorization endpoint.
#[derive(Clone)]
pub struct AuthorizationService {
    accounts: Arc<dyn AccountStorage>,
    clients: Arc<dyn ClientStorage>,
    codes: Arc<dyn AuthorizationCodeStorage>,
    sessions: Arc<dyn SessionStorage>,
    tenants: Arc<dyn TenantResolver>,
    config: AuthConfig,
}

impl AuthorizationService {
    pub fn new(
        accounts: Arc<dyn AccountStorage>,
        clients: Arc<dyn ClientStorage>,
        codes: Arc<dyn AuthorizationCodeStorage>,
        sessions: Arc<dyn SessionStorage>,
        tenants: Arc<dyn TenantResolver>,
        config: AuthConfig,
    ) -> Self {
        Self {
            accounts,
            clients,
            codes,
            sessions,
            tenants,
            config,
        }
    }

    /// Runs the full authorization flow.
    ///
    /// `session_token` is the cookie value when the browser still carries
    /// one. On success the session (if any) has been terminated; the
    /// caller clears the cookie.
    pub async fn authorize(
        &self,
        request: &AuthorizationRequest,
        session_token: Option<&str>,
    ) -> AuthResult<AuthorizeOutcome> {
        request.validate()?;

        let session = match session_token {
            Some(token) => self.sessions.find_by_token(token).await?,
            None => None,
        };
        let state = StateParam::parse(&request.state, self.config.state_identifier_min_length);

        let account = self.recover_identity(session.as_ref(), &state).await?;

        let client = self
            .clients
            .find_active()
            .await?
            .ok_or_else(|| AuthError::invalid_request("no active client configured"))?;

        let code = AuthorizationCode::mint(
            account.id,
            client.client_id.clone(),
            time::Duration::seconds(self.config.authorization_code_lifetime.as_secs() as i64),
        );
        self.codes.create(&code).await?;

        // The bridged session is single-purpose; drop it now that a code
        // has been minted.
        if let Some(session) = &session {
            self.sessions.delete(&session.token).await?;
        }

        let redirect = redirect_with_code(&request.redirect_uri, &code.code, &state.raw)?;

        if let Some(path) = &state.path
            && !account.subaccount_id.is_empty()
        {
            let tenant = self.tenants.resolve(&request.redirect_uri, &account);
            let destination_url =
                format!("https://{}.{}{}", tenant, self.config.platform.domain, path);
            info!(
                unique_id = %account.unique_id,
                tenant = %tenant,
                "Authorization granted with interstitial continuation"
            );
            return Ok(AuthorizeOutcome::Interstitial {
                frame_url: redirect,
                destination_url,
            });
        }

        info!(unique_id = %account.unique_id, "Authorization granted");
        Ok(AuthorizeOutcome::Redirect(redirect))
    }

    /// Ordered identity recovery chain; first resolver that finds an
    /// account wins.
    async fn recover_identity(
        &self,
        session: Option<&BrowserSession>,
        state: &StateParam,
    ) -> AuthResult<Account> {
        if let Some(session) = session {
            if let Some(account) = self.accounts.find_by_id(session.account_id).await? {
                debug!(unique_id = %account.unique_id, "Identity from session account id");
                return Ok(account);
            }
            if let Some(account) = self.accounts.find_by_unique_id(&session.unique_id).await? {
                debug!(unique_id = %account.unique_id, "Identity from session unique id");
                return Ok(account);
            }
        }

        if let Some(identifier) = &state.identifier
            && let Some(account) = self.accounts.find_by_unique_id(identifier).await?
        {
            debug!(unique_id = %account.unique_id, "Identity from state parameter");
            return Ok(account);
        }

        if let Some(session) = session
            && !session.email.is_empty()
            && let Some(account) = self.accounts.find_by_email(&session.email).await?
        {
            debug!(unique_id = %account.unique_id, "Identity from session email");
            return Ok(account);
        }

        warn!("Authorization request with no recoverable identity");
        Err(AuthError::forbidden("session not found"))
    }
}

/// Appends `code` and `state` to the client's redirect URI.
fn redirect_with_code(redirect_uri: &str, code: &str, state: &str) -> AuthResult<String> {
    let mut url = Url::parse(redirect_uri)
        .map_err(|e| AuthError::invalid_request(format!("invalid redirect_uri: {e}")))?;
    url.query_pairs_mut()
        .append_pair("code", code)
        .append_pair("state", state);
    Ok(url.to_string())
}
