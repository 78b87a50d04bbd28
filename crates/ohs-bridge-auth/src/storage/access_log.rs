//! Access log storage trait.

use async_trait::async_trait;

use crate::AuthResult;
use ohs_bridge_core::AccessLog;

/// Append-only storage for the access audit trail.
#[async_trait]
pub trait AccessLogStorage: Send + Sync {
    /// Append an entry. Entries are never mutated or deleted by the core.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn append(&self, entry: &AccessLog) -> AuthResult<()>;
}
