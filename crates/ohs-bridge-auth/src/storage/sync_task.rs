//! Sync task storage trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::AuthResult;
use ohs_bridge_core::SyncTask;

/// Storage for downstream reconciliation tasks.
///
/// The core only enqueues; the processing side belongs to an external
/// worker and is not part of this crate.
#[async_trait]
pub trait SyncTaskStorage: Send + Sync {
    /// Enqueue a task.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn enqueue(&self, task: &SyncTask) -> AuthResult<()>;

    /// List tasks for an account, newest first. Used by tests and
    /// operator tooling, not by the flows themselves.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn list_for_account(&self, account_id: Uuid) -> AuthResult<Vec<SyncTask>>;
}
