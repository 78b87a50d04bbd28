//! In-memory access log storage.

use async_trait::async_trait;
use tokio::sync::RwLock;

use ohs_bridge_auth::AuthResult;
use ohs_bridge_auth::storage::AccessLogStorage;
use ohs_bridge_core::AccessLog;

/// Append-only in-memory access log.
#[derive(Default)]
pub struct InMemoryAccessLogStorage {
    entries: RwLock<Vec<AccessLog>>,
}

impl InMemoryAccessLogStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all entries, oldest first. Test helper.
    pub async fn entries(&self) -> Vec<AccessLog> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl AccessLogStorage for InMemoryAccessLogStorage {
    async fn append(&self, entry: &AccessLog) -> AuthResult<()> {
        let mut entries = self.entries.write().await;
        entries.push(entry.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_append_preserves_order() {
        let storage = InMemoryAccessLogStorage::new();
        let account_id = Uuid::new_v4();
        storage
            .append(&AccessLog::success(account_id, None, "ua1".into()))
            .await
            .unwrap();
        storage
            .append(&AccessLog::failure(account_id, None, "ua2".into(), "bad"))
            .await
            .unwrap();

        let entries = storage.entries().await;
        assert_eq!(entries.len(), 2);
        assert!(entries[0].success);
        assert!(!entries[1].success);
        assert_eq!(entries[1].error_message, "bad");
    }
}
