//! OHS Bridge server binary support library.

pub mod bootstrap;
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod server;

pub use config::{AppConfig, BootstrapConfig, LoggingConfig, ServerConfig};
pub use observability::{apply_logging_level, init_tracing, init_tracing_with_level};
pub use server::{AppState, OhsBridgeServer, ServerBuilder, build_app};
