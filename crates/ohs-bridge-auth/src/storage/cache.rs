//! Optional best-effort side cache.
//!
//! The original deployment kept an opaque connection to an external cache
//! that the specified flows reference but never depend on. It is modeled
//! here as an injected dependency with a no-op default rather than
//! process-wide ambient state.

use async_trait::async_trait;

/// Best-effort key/value side channel. Failures are swallowed by
/// implementations; callers never branch on the outcome.
#[async_trait]
pub trait SideCache: Send + Sync {
    /// Store a value. Best effort.
    async fn put(&self, key: &str, value: &str);

    /// Fetch a value, if the cache has one.
    async fn get(&self, key: &str) -> Option<String>;
}

/// Default cache that stores nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

#[async_trait]
impl SideCache for NoopCache {
    async fn put(&self, _key: &str, _value: &str) {}

    async fn get(&self, _key: &str) -> Option<String> {
        None
    }
}
