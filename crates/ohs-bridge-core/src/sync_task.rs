//! Downstream synchronization task markers.
//!
//! The core only enqueues tasks; an external worker picks them up and
//! performs the best-effort reconciliation with the Bridge platform.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Kind of reconciliation work the external worker should perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    /// Subaccount-level sync.
    Account,
    /// User profile sync.
    User,
    /// Course access grant.
    Access,
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Account => write!(f, "account"),
            Self::User => write!(f, "user"),
            Self::Access => write!(f, "access"),
        }
    }
}

/// Lifecycle state of a sync task.
///
/// The core only ever creates tasks in [`TaskStatus::Pending`]; the
/// remaining transitions belong to the external worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Processing => write!(f, "processing"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// A queued unit of downstream reconciliation work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncTask {
    /// Task identifier.
    pub id: Uuid,

    /// Account this task applies to.
    pub account_id: Uuid,

    /// Kind of work to perform.
    pub task_type: TaskType,

    /// Lifecycle state.
    pub status: TaskStatus,

    /// Timestamp when the task was enqueued.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,

    /// Timestamp when the worker picked the task up.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub started_at: Option<OffsetDateTime>,

    /// Timestamp when the worker finished.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub completed_at: Option<OffsetDateTime>,

    /// Failure detail, if any.
    pub error_message: String,
}

impl SyncTask {
    /// Creates a new pending task for the given account.
    #[must_use]
    pub fn pending(account_id: Uuid, task_type: TaskType) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            task_type,
            status: TaskStatus::Pending,
            created_at: OffsetDateTime::now_utc(),
            started_at: None,
            completed_at: None,
            error_message: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_task() {
        let account_id = Uuid::new_v4();
        let task = SyncTask::pending(account_id, TaskType::User);
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.task_type, TaskType::User);
        assert!(task.started_at.is_none());
    }

    #[test]
    fn test_task_type_display() {
        assert_eq!(TaskType::User.to_string(), "user");
        assert_eq!(TaskStatus::Pending.to_string(), "pending");
    }
}
