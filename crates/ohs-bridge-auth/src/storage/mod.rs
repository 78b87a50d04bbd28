//! Storage traits for authentication and bridge data.
//!
//! This module defines storage interfaces for:
//!
//! - Accounts and their audit trail
//! - OAuth client credentials
//! - Authorization codes and access tokens
//! - Browser sessions
//! - Sync task enqueueing
//!
//! # Implementations
//!
//! Storage implementations are provided in separate crates:
//!
//! - `ohs-bridge-auth-memory` - In-memory backend

pub mod access_log;
pub mod account;
pub mod cache;
pub mod client;
pub mod code;
pub mod session;
pub mod sync_task;
pub mod token;

pub use access_log::AccessLogStorage;
pub use account::AccountStorage;
pub use cache::{NoopCache, SideCache};
pub use client::ClientStorage;
pub use code::AuthorizationCodeStorage;
pub use session::SessionStorage;
pub use sync_task::SyncTaskStorage;
pub use token::AccessTokenStorage;
