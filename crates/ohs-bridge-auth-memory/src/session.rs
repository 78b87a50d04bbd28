//! In-memory browser session storage.

use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use ohs_bridge_auth::AuthResult;
use ohs_bridge_auth::session::BrowserSession;
use ohs_bridge_auth::storage::SessionStorage;

/// Sessions keyed by their cookie token.
#[derive(Default)]
pub struct InMemorySessionStorage {
    sessions: RwLock<HashMap<String, BrowserSession>>,
}

impl InMemorySessionStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStorage for InMemorySessionStorage {
    async fn put(&self, session: &BrowserSession) -> AuthResult<()> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.token.clone(), session.clone());
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> AuthResult<Option<BrowserSession>> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(token)
            .filter(|s| !s.is_expired_at(OffsetDateTime::now_utc()))
            .cloned())
    }

    async fn delete(&self, token: &str) -> AuthResult<()> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(token);
        Ok(())
    }
}
