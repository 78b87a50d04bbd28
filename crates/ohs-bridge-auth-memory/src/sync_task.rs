//! In-memory sync task queue.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use ohs_bridge_auth::AuthResult;
use ohs_bridge_auth::storage::SyncTaskStorage;
use ohs_bridge_core::SyncTask;

/// FIFO in-memory task list. An external worker would drain this; the
/// bridge itself only enqueues.
#[derive(Default)]
pub struct InMemorySyncTaskStorage {
    tasks: RwLock<Vec<SyncTask>>,
}

impl InMemorySyncTaskStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SyncTaskStorage for InMemorySyncTaskStorage {
    async fn enqueue(&self, task: &SyncTask) -> AuthResult<()> {
        let mut tasks = self.tasks.write().await;
        tasks.push(task.clone());
        Ok(())
    }

    async fn list_for_account(&self, account_id: Uuid) -> AuthResult<Vec<SyncTask>> {
        let tasks = self.tasks.read().await;
        // Newest first, per the trait contract.
        Ok(tasks
            .iter()
            .rev()
            .filter(|t| t.account_id == account_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ohs_bridge_core::{TaskStatus, TaskType};

    #[tokio::test]
    async fn test_enqueue_and_list() {
        let storage = InMemorySyncTaskStorage::new();
        let account_id = Uuid::new_v4();
        storage
            .enqueue(&SyncTask::pending(account_id, TaskType::User))
            .await
            .unwrap();
        storage
            .enqueue(&SyncTask::pending(Uuid::new_v4(), TaskType::User))
            .await
            .unwrap();

        let tasks = storage.list_for_account(account_id).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].status, TaskStatus::Pending);
        assert_eq!(tasks[0].task_type, TaskType::User);
    }

    #[tokio::test]
    async fn test_list_returns_newest_first() {
        let storage = InMemorySyncTaskStorage::new();
        let account_id = Uuid::new_v4();
        let older = SyncTask::pending(account_id, TaskType::User);
        let newer = SyncTask::pending(account_id, TaskType::User);
        storage.enqueue(&older).await.unwrap();
        storage.enqueue(&newer).await.unwrap();

        let tasks = storage.list_for_account(account_id).await.unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, newer.id);
        assert_eq!(tasks[1].id, older.id);
    }
}
