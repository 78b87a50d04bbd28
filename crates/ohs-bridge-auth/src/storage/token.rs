//! Access token storage trait.

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::AuthResult;
use crate::types::AccessToken;

/// Storage operations for bearer access tokens.
///
/// Tokens are written once by the token endpoint and only ever read
/// afterwards; expiry is by time, not deletion.
#[async_trait]
pub trait AccessTokenStorage: Send + Sync {
    /// Persist a freshly issued token.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn create(&self, token: &AccessToken) -> AuthResult<()>;

    /// Find a token by exact value, provided it expires after `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_valid(&self, token: &str, now: OffsetDateTime)
    -> AuthResult<Option<AccessToken>>;
}
