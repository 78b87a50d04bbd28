//! In-memory client storage.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use ohs_bridge_auth::AuthResult;
use ohs_bridge_auth::storage::ClientStorage;
use ohs_bridge_auth::types::AuthClient;

/// Clients keyed by `client_id`.
///
/// The bridge runs with a single active client in practice;
/// `find_active` returns the first active one it sees.
#[derive(Default)]
pub struct InMemoryClientStorage {
    clients: RwLock<HashMap<String, AuthClient>>,
}

impl InMemoryClientStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientStorage for InMemoryClientStorage {
    async fn find_active(&self) -> AuthResult<Option<AuthClient>> {
        let clients = self.clients.read().await;
        Ok(clients.values().find(|c| c.is_active).cloned())
    }

    async fn find_by_client_id(&self, client_id: &str) -> AuthResult<Option<AuthClient>> {
        let clients = self.clients.read().await;
        Ok(clients.get(client_id).cloned())
    }

    async fn create(&self, client: &AuthClient) -> AuthResult<AuthClient> {
        let mut clients = self.clients.write().await;
        clients.insert(client.client_id.clone(), client.clone());
        Ok(client.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_find() {
        let storage = InMemoryClientStorage::new();
        assert!(storage.find_active().await.unwrap().is_none());

        let client = AuthClient::generate("wordpress", "https://safetynow.bridgeapp.com");
        storage.create(&client).await.unwrap();

        let active = storage.find_active().await.unwrap().unwrap();
        assert_eq!(active.client_id, client.client_id);
        assert!(
            storage
                .find_by_client_id(&client.client_id)
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_inactive_client_not_returned_as_active() {
        let storage = InMemoryClientStorage::new();
        let mut client = AuthClient::generate("old", "https://example.com");
        client.is_active = false;
        storage.create(&client).await.unwrap();
        assert!(storage.find_active().await.unwrap().is_none());
        // But it is still addressable by id.
        assert!(
            storage
                .find_by_client_id(&client.client_id)
                .await
                .unwrap()
                .is_some()
        );
    }
}
