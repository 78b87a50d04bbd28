//! Client storage trait.

use async_trait::async_trait;

use crate::AuthResult;
use crate::types::AuthClient;

/// Storage operations for OAuth client credentials.
#[async_trait]
pub trait ClientStorage: Send + Sync {
    /// Find the single active client.
    ///
    /// Callers treat `None` as a configuration fault, not a user error:
    /// every signing and verification operation requires one.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_active(&self) -> AuthResult<Option<AuthClient>>;

    /// Find a client by its OAuth `client_id`, active or not.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_client_id(&self, client_id: &str) -> AuthResult<Option<AuthClient>>;

    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if a client with the same `client_id` already
    /// exists or the storage operation fails.
    async fn create(&self, client: &AuthClient) -> AuthResult<AuthClient>;
}
