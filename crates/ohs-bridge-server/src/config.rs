//! Server configuration.
//!
//! Loaded from an optional TOML file plus `OHSBRIDGE__`-prefixed
//! environment overrides, e.g. `OHSBRIDGE__SERVER__PORT=9090` or
//! `OHSBRIDGE__AUTH__PLATFORM__DOMAIN=bridgeapp.com`.

use std::net::{IpAddr, SocketAddr};

use ohs_bridge_auth::config::AuthConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Authentication and bridge flow configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Bootstrap configuration (initial client seeding).
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.server.validate()?;
        self.logging.validate()?;
        self.auth.validate()?;
        self.bootstrap.validate()
    }

    /// Socket address the server binds to.
    ///
    /// `validate` has already rejected hosts that are not IP addresses,
    /// so the fallback is unreachable in a loaded config.
    pub fn addr(&self) -> SocketAddr {
        match self.server.host.parse::<IpAddr>() {
            Ok(ip) => SocketAddr::new(ip, self.server.port),
            Err(_) => SocketAddr::from(([127, 0, 0, 1], self.server.port)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("server.host must not be empty".into());
        }
        if self.host.parse::<std::net::IpAddr>().is_err() {
            return Err(format!(
                "server.host '{}' is not a valid IP address",
                self.host
            ));
        }
        if self.port == 0 {
            return Err("server.port must be > 0".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Fallback log level when RUST_LOG is not set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), String> {
        match self.level.to_ascii_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(format!("logging.level '{other}' is not a valid level")),
        }
    }
}

/// Initial client seeding.
///
/// When no active client exists at startup, one is created. Credentials
/// can be pinned in configuration (so the legacy site's copy keeps
/// working across wipes of the in-memory store) or left empty to be
/// generated and logged once.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Human-readable client name.
    pub client_name: String,
    /// Base URL of the legacy site this client represents.
    pub client_base_url: String,
    /// Pinned client id; generated when empty.
    pub client_id: Option<String>,
    /// Pinned client secret; generated when empty.
    /// Prefer the OHSBRIDGE__BOOTSTRAP__CLIENT_SECRET env var over TOML.
    pub client_secret: Option<String>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            client_name: "wordpress".to_string(),
            client_base_url: "https://www.safetynowhq.com".to_string(),
            client_id: None,
            client_secret: None,
        }
    }
}

impl BootstrapConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.client_name.is_empty() {
            return Err("bootstrap.client_name must not be empty".into());
        }
        match (&self.client_id, &self.client_secret) {
            (Some(_), None) | (None, Some(_)) => Err(
                "bootstrap.client_id and bootstrap.client_secret must be set together".into(),
            ),
            _ => Ok(()),
        }
    }
}

pub mod loader {
    use super::AppConfig;
    use config::{Config, Environment, File};
    use std::path::PathBuf;

    pub fn load_config(path: Option<&str>) -> Result<AppConfig, String> {
        let mut builder = Config::builder();
        match path {
            Some(p) => {
                let pathbuf = PathBuf::from(p);
                if pathbuf.exists() {
                    builder = builder.add_source(File::from(pathbuf));
                }
            }
            None => {
                let default_path = PathBuf::from("ohsbridge.toml");
                if default_path.exists() {
                    builder = builder.add_source(File::from(default_path));
                }
            }
        }
        builder = builder.add_source(
            Environment::with_prefix("OHSBRIDGE")
                .try_parsing(true)
                .separator("__"),
        );
        let cfg = builder
            .build()
            .map_err(|e| format!("config build error: {e}"))?;
        let merged: AppConfig = cfg
            .try_deserialize()
            .map_err(|e| format!("config deserialize error: {e}"))?;
        merged.validate()?;
        Ok(merged)
    }
}
