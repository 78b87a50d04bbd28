use std::env;

use ohs_bridge_server::config::loader::load_config;
use ohs_bridge_server::{AppState, ServerBuilder, bootstrap};

/// How the configuration path was determined.
#[derive(Debug, Clone, Copy)]
enum ConfigSource {
    /// From --config CLI argument
    CliArgument,
    /// From OHSBRIDGE_CONFIG environment variable
    EnvironmentVariable,
    /// Default path (ohsbridge.toml)
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CliArgument => write!(f, "CLI argument (--config)"),
            Self::EnvironmentVariable => write!(f, "environment variable (OHSBRIDGE_CONFIG)"),
            Self::Default => write!(f, "default"),
        }
    }
}

#[tokio::main]
async fn main() {
    // Load .env file if present, before anything reads the environment.
    if let Err(e) = dotenvy::dotenv() {
        if !matches!(e, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            eprintln!("Warning: Failed to load .env file: {e}");
        }
    }

    ohs_bridge_server::init_tracing();

    let (config_path, source) = resolve_config_path();
    let cfg = match load_config(config_path.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(2);
        }
    };

    tracing::info!(
        path = %config_path.as_deref().unwrap_or("ohsbridge.toml"),
        source = %source,
        "Configuration loaded"
    );
    ohs_bridge_server::apply_logging_level(&cfg.logging.level);

    let state = AppState::in_memory();
    if let Err(e) = bootstrap::seed_client(&state.clients, &cfg.bootstrap).await {
        eprintln!("Bootstrap error: {e}");
        std::process::exit(2);
    }

    let server = match ServerBuilder::new()
        .with_config(cfg)
        .with_state(state)
        .build()
    {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Server build error: {e}");
            std::process::exit(2);
        }
    };

    if let Err(e) = server.run().await {
        eprintln!("Server error: {e}");
        std::process::exit(1);
    }
}

fn resolve_config_path() -> (Option<String>, ConfigSource) {
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config"
            && let Some(path) = args.next()
        {
            return (Some(path), ConfigSource::CliArgument);
        }
    }
    if let Ok(path) = env::var("OHSBRIDGE_CONFIG") {
        return (Some(path), ConfigSource::EnvironmentVariable);
    }
    (None, ConfigSource::Default)
}
