//! # ohs-bridge-core
//!
//! Domain entities shared by the OHS Bridge SSO service.
//!
//! This crate holds the persistent data model: the [`Account`] root entity
//! keyed by its external `unique_id`, the append-only [`AccessLog`] audit
//! trail, and the [`SyncTask`] queue markers left behind for the external
//! reconciliation worker.
//!
//! ## Modules
//!
//! - [`account`] - Account entity and upsert payload
//! - [`access_log`] - Access audit trail entries
//! - [`sync_task`] - Downstream synchronization task markers
//! - [`error`] - Core error type

pub mod access_log;
pub mod account;
pub mod error;
pub mod sync_task;

pub use access_log::AccessLog;
pub use account::{Account, AccountFields};
pub use error::CoreError;
pub use sync_task::{SyncTask, TaskStatus, TaskType};

/// Type alias for core operation results.
pub type Result<T> = std::result::Result<T, CoreError>;
