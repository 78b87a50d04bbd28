//! In-memory authorization code storage.

use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use ohs_bridge_auth::AuthResult;
use ohs_bridge_auth::storage::AuthorizationCodeStorage;
use ohs_bridge_auth::types::AuthorizationCode;

/// Codes keyed by their opaque value.
#[derive(Default)]
pub struct InMemoryAuthorizationCodeStorage {
    codes: RwLock<HashMap<String, AuthorizationCode>>,
}

impl InMemoryAuthorizationCodeStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthorizationCodeStorage for InMemoryAuthorizationCodeStorage {
    async fn create(&self, code: &AuthorizationCode) -> AuthResult<()> {
        let mut codes = self.codes.write().await;
        codes.insert(code.code.clone(), code.clone());
        Ok(())
    }

    async fn consume(
        &self,
        code: &str,
        now: OffsetDateTime,
    ) -> AuthResult<Option<AuthorizationCode>> {
        // Check and mark under one write lock so exactly one caller wins
        // a concurrent redemption race.
        let mut codes = self.codes.write().await;
        let Some(stored) = codes.get_mut(code) else {
            return Ok(None);
        };
        if stored.used || stored.is_expired_at(now) {
            return Ok(None);
        }
        stored.used = true;
        Ok(Some(stored.clone()))
    }
}
