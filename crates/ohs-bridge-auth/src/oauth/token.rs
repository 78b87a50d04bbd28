//! Token endpoint flow.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use subtle::ConstantTimeEq;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::AuthResult;
use crate::error::AuthError;
use crate::storage::{AccessTokenStorage, AuthorizationCodeStorage, ClientStorage};
use crate::types::AccessToken;

/// Successful token response body.
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
}

/// Parses an HTTP Basic `Authorization` header value into credentials.
///
/// Decode failures are deliberately opaque; the caller treats them the
/// same as wrong credentials.
pub fn parse_basic_credentials(header: &str) -> AuthResult<(String, String)> {
    let encoded = header
        .strip_prefix("Basic ")
        .ok_or_else(|| AuthError::forbidden("invalid authorization header"))?;
    let decoded = STANDARD
        .decode(encoded.trim())
        .map_err(|_| AuthError::forbidden("invalid authorization header"))?;
    let decoded = String::from_utf8(decoded)
        .map_err(|_| AuthError::forbidden("invalid authorization header"))?;
    let (client_id, client_secret) = decoded
        .split_once(':')
        .ok_or_else(|| AuthError::forbidden("invalid authorization header"))?;
    Ok((client_id.to_string(), client_secret.to_string()))
}

/// Service exchanging authorization codes for access tokens.
#[derive(Clone)]
pub struct TokenService {
    clients: Arc<dyn ClientStorage>,
    codes: Arc<dyn AuthorizationCodeStorage>,
    tokens: Arc<dyn AccessTokenStorage>,
    access_token_lifetime: std::time::Duration,
}

impl TokenService {
    pub fn new(
        clients: Arc<dyn ClientStorage>,
        codes: Arc<dyn AuthorizationCodeStorage>,
        tokens: Arc<dyn AccessTokenStorage>,
        access_token_lifetime: std::time::Duration,
    ) -> Self {
        Self {
            clients,
            codes,
            tokens,
            access_token_lifetime,
        }
    }

    /// Exchanges a single-use authorization code for a bearer token.
    ///
    /// Unknown client, inactive client and wrong secret all collapse into
    /// one undifferentiated rejection.
    pub async fn exchange(
        &self,
        client_id: &str,
        client_secret: &str,
        code: &str,
    ) -> AuthResult<TokenResponse> {
        let client = self
            .clients
            .find_by_client_id(client_id)
            .await?
            .filter(|c| c.is_active)
            .ok_or_else(|| AuthError::forbidden("invalid client credentials"))?;

        let secrets_match: bool = client
            .client_secret
            .as_bytes()
            .ct_eq(client_secret.as_bytes())
            .into();
        if !secrets_match {
            warn!(client_id = %client.client_id, "Token request with wrong client secret");
            return Err(AuthError::forbidden("invalid client credentials"));
        }

        let now = OffsetDateTime::now_utc();
        let consumed = self
            .codes
            .consume(code, now)
            .await?
            .ok_or_else(|| AuthError::forbidden("invalid or expired code"))?;

        if consumed.client_id != client.client_id {
            warn!(client_id = %client.client_id, "Code presented by a different client");
            return Err(AuthError::forbidden("invalid or expired code"));
        }

        let token = AccessToken::issue(
            consumed.account_id,
            client.client_id.clone(),
            time::Duration::seconds(self.access_token_lifetime.as_secs() as i64),
        );
        self.tokens.create(&token).await?;

        info!(
            client_id = %client.client_id,
            account_id = %consumed.account_id,
            "Access token issued"
        );
        Ok(TokenResponse {
            access_token: token.token,
            token_type: "Bearer",
            expires_in: self.access_token_lifetime.as_secs(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_credentials() {
        let header = format!("Basic {}", STANDARD.encode("abc123:s3cret"));
        let (id, secret) = parse_basic_credentials(&header).unwrap();
        assert_eq!(id, "abc123");
        assert_eq!(secret, "s3cret");
    }

    #[test]
    fn test_parse_basic_rejects_wrong_scheme() {
        assert!(parse_basic_credentials("Bearer abc").is_err());
    }

    #[test]
    fn test_parse_basic_rejects_bad_base64() {
        assert!(parse_basic_credentials("Basic !!!not-base64!!!").is_err());
    }

    #[test]
    fn test_parse_basic_rejects_missing_colon() {
        let header = format!("Basic {}", STANDARD.encode("no-colon-here"));
        assert!(parse_basic_credentials(&header).is_err());
    }
}
