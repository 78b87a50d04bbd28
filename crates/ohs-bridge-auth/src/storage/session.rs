//! Browser session storage trait.
//!
//! # Implementation Notes
//!
//! `put` must be durable by the time it returns: the session bridge
//! redirects the browser across an origin boundary immediately afterwards,
//! and the next request expects the session to already be visible.

use async_trait::async_trait;

use crate::AuthResult;
use crate::session::BrowserSession;

/// Storage for short-lived authenticated browser sessions.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Persist a session, replacing any prior session with the same token.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn put(&self, session: &BrowserSession) -> AuthResult<()>;

    /// Find a non-expired session by its token.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_token(&self, token: &str) -> AuthResult<Option<BrowserSession>>;

    /// Terminate a session. Deleting an unknown token is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn delete(&self, token: &str) -> AuthResult<()>;
}
