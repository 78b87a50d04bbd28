//! In-memory storage backend for the OHS Bridge auth crate.
//!
//! Implements every storage trait from `ohs-bridge-auth` on top of
//! `tokio::sync::RwLock<HashMap>`. Suitable for tests and single-process
//! deployments; nothing survives a restart.
//!
//! The atomicity contracts of the traits are honored by holding the write
//! lock across the whole check-then-mutate section (authorization code
//! consumption, account upsert).

pub mod access_log;
pub mod account;
pub mod client;
pub mod code;
pub mod session;
pub mod sync_task;
pub mod token;

pub use access_log::InMemoryAccessLogStorage;
pub use account::InMemoryAccountStorage;
pub use client::InMemoryClientStorage;
pub use code::InMemoryAuthorizationCodeStorage;
pub use session::InMemorySessionStorage;
pub use sync_task::InMemorySyncTaskStorage;
pub use token::InMemoryAccessTokenStorage;
