//! Authorization code storage trait.
//!
//! # Security Considerations
//!
//! - Never log authorization codes
//! - `consume` must be atomic to prevent replay: two concurrent exchanges
//!   of the same code must not both succeed

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::AuthResult;
use crate::types::AuthorizationCode;

/// Storage operations for single-use authorization codes.
#[async_trait]
pub trait AuthorizationCodeStorage: Send + Sync {
    /// Persist a freshly minted code.
    ///
    /// # Errors
    ///
    /// Returns an error if the code value collides or the storage
    /// operation fails.
    async fn create(&self, code: &AuthorizationCode) -> AuthResult<()>;

    /// Atomically consume a code: if a code with this value exists, is
    /// unused, and expires after `now`, mark it used and return it.
    ///
    /// Returns `None` for unknown, already-used, and expired codes alike;
    /// callers fold all three into one undifferentiated rejection. Exactly
    /// one of any set of concurrent consumers observes `Some`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn consume(&self, code: &str, now: OffsetDateTime)
    -> AuthResult<Option<AuthorizationCode>>;
}
