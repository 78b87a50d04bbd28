//! In-memory access token storage.

use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use ohs_bridge_auth::AuthResult;
use ohs_bridge_auth::storage::AccessTokenStorage;
use ohs_bridge_auth::types::AccessToken;

/// Tokens keyed by their opaque value.
#[derive(Default)]
pub struct InMemoryAccessTokenStorage {
    tokens: RwLock<HashMap<String, AccessToken>>,
}

impl InMemoryAccessTokenStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccessTokenStorage for InMemoryAccessTokenStorage {
    async fn create(&self, token: &AccessToken) -> AuthResult<()> {
        let mut tokens = self.tokens.write().await;
        tokens.insert(token.token.clone(), token.clone());
        Ok(())
    }

    async fn find_valid(
        &self,
        token: &str,
        now: OffsetDateTime,
    ) -> AuthResult<Option<AccessToken>> {
        let tokens = self.tokens.read().await;
        Ok(tokens
            .get(token)
            .filter(|t| !t.is_expired_at(now))
            .cloned())
    }
}
