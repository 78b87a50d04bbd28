//! In-memory account storage.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use ohs_bridge_auth::AuthResult;
use ohs_bridge_auth::storage::AccountStorage;
use ohs_bridge_core::{Account, AccountFields};

/// Accounts keyed by their external unique id.
#[derive(Default)]
pub struct InMemoryAccountStorage {
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryAccountStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStorage for InMemoryAccountStorage {
    async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.id == id).cloned())
    }

    async fn find_by_unique_id(&self, unique_id: &str) -> AuthResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(unique_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn upsert(&self, unique_id: &str, fields: AccountFields) -> AuthResult<Account> {
        // Write lock held across the whole get-or-create so a concurrent
        // upsert for the same unique_id cannot create a second row.
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .entry(unique_id.to_string())
            .and_modify(|existing| existing.apply(fields.clone()))
            .or_insert_with(|| Account::new(unique_id, fields));
        Ok(account.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn fields(email: &str) -> AccountFields {
        AccountFields {
            email: email.to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            subaccount_id: "acme".to_string(),
        }
    }

    #[tokio::test]
    async fn test_upsert_creates_then_overwrites() {
        let storage = InMemoryAccountStorage::new();
        let created = storage.upsert("u1", fields("a@example.com")).await.unwrap();
        let updated = storage.upsert("u1", fields("b@example.com")).await.unwrap();
        assert_eq!(created.id, updated.id);
        assert_eq!(updated.email, "b@example.com");
        assert_eq!(
            storage.find_by_unique_id("u1").await.unwrap().unwrap().email,
            "b@example.com"
        );
    }

    #[tokio::test]
    async fn test_lookup_by_id_and_email() {
        let storage = InMemoryAccountStorage::new();
        let account = storage.upsert("u1", fields("a@example.com")).await.unwrap();
        assert!(storage.find_by_id(account.id).await.unwrap().is_some());
        assert!(
            storage
                .find_by_email("a@example.com")
                .await
                .unwrap()
                .is_some()
        );
        assert!(storage.find_by_unique_id("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_upserts_converge_on_one_row() {
        let storage = Arc::new(InMemoryAccountStorage::new());
        let mut handles = Vec::new();
        for i in 0..16 {
            let storage = storage.clone();
            handles.push(tokio::spawn(async move {
                storage
                    .upsert("u1", fields(&format!("{i}@example.com")))
                    .await
                    .unwrap()
            }));
        }
        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().id);
        }
        let first = ids[0];
        assert!(ids.iter().all(|id| *id == first));
        assert_eq!(storage.accounts.read().await.len(), 1);
    }
}
