//! Account storage trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::AuthResult;
use ohs_bridge_core::{Account, AccountFields};

/// Storage operations for accounts.
///
/// `unique_id` is the sole external join key; every lookup the flows need
/// goes through one of the finders below.
#[async_trait]
pub trait AccountStorage: Send + Sync {
    /// Find an account by its internal row identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<Account>>;

    /// Find an account by its external `unique_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_unique_id(&self, unique_id: &str) -> AuthResult<Option<Account>>;

    /// Find an account by email address.
    ///
    /// Used by the last identity-recovery fallback on the authorize path.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<Account>>;

    /// Create or update an account keyed by `unique_id`.
    ///
    /// The get-or-create must be atomic: two concurrent upserts of the same
    /// `unique_id` must not produce duplicate rows. Updates are an
    /// unconditional last-writer-wins overwrite of the profile fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn upsert(&self, unique_id: &str, fields: AccountFields) -> AuthResult<Account>;
}
