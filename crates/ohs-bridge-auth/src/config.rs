//! Authentication and bridge configuration.
//!
//! Durations use humantime strings in TOML (e.g. `"5m"`, `"1h"`).
//!
//! # Example (TOML)
//!
//! ```toml
//! [auth]
//! login_freshness_window = "5m"
//! authorization_code_lifetime = "5m"
//! access_token_lifetime = "1h"
//!
//! [auth.platform]
//! base_url = "https://safetynow.bridgeapp.com"
//! domain = "bridgeapp.com"
//! tenant_suffix = "safetynow"
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root authentication configuration for the bridge.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Replay/freshness window for inbound login notifications.
    /// A notification with `|now - timestamp|` beyond this is rejected.
    #[serde(with = "humantime_serde")]
    pub login_freshness_window: Duration,

    /// Authorization code lifetime. Codes are single-use and short-lived.
    #[serde(with = "humantime_serde")]
    pub authorization_code_lifetime: Duration,

    /// Access token lifetime. There is no revocation list; validity is
    /// purely `now < expires_at`.
    #[serde(with = "humantime_serde")]
    pub access_token_lifetime: Duration,

    /// Minimum length for a bare `state` value to be treated as a
    /// candidate account identifier during identity recovery.
    pub state_identifier_min_length: usize,

    /// Browser session settings.
    pub session: SessionConfig,

    /// Downstream platform URL conventions.
    pub platform: PlatformConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_freshness_window: Duration::from_secs(300),
            authorization_code_lifetime: Duration::from_secs(300),
            access_token_lifetime: Duration::from_secs(3600),
            state_identifier_min_length: 10,
            session: SessionConfig::default(),
            platform: PlatformConfig::default(),
        }
    }
}

impl AuthConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.login_freshness_window.is_zero() {
            return Err("auth.login_freshness_window must be > 0".into());
        }
        if self.authorization_code_lifetime.is_zero() {
            return Err("auth.authorization_code_lifetime must be > 0".into());
        }
        if self.access_token_lifetime.is_zero() {
            return Err("auth.access_token_lifetime must be > 0".into());
        }
        if self.session.cookie_name.is_empty() {
            return Err("auth.session.cookie_name must not be empty".into());
        }
        self.platform.validate()
    }
}

/// Browser session settings for the session bridge.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Name of the session cookie set by the session bridge.
    pub cookie_name: String,

    /// How long a bridged session stays resolvable. Sessions are consumed
    /// (terminated) by the authorize endpoint long before this in the
    /// normal flow.
    #[serde(with = "humantime_serde")]
    pub lifetime: Duration,

    /// Whether to mark cookies `Secure` (true in production).
    pub secure_cookies: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "ohs_session".to_string(),
            lifetime: Duration::from_secs(600),
            secure_cookies: true,
        }
    }
}

/// Downstream platform URL conventions.
///
/// These describe one specific platform's layout; the tenant subdomain
/// heuristic built on top of them lives behind the
/// [`TenantResolver`](crate::oauth::TenantResolver) trait.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Platform base URL used by the legacy callback redirect.
    pub base_url: String,

    /// Platform apex domain under which tenants live
    /// (`https://<tenant>.<domain>`).
    pub domain: String,

    /// Suffix appended to tenant subdomains when absent
    /// (e.g. `acme` becomes `acme-safetynow`).
    pub tenant_suffix: String,

    /// Path of the per-tenant login page.
    pub login_path: String,

    /// Path of the learner course listing, used by the legacy callback.
    pub courses_path: String,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            base_url: "https://safetynow.bridgeapp.com".to_string(),
            domain: "bridgeapp.com".to_string(),
            tenant_suffix: "safetynow".to_string(),
            login_path: "/login".to_string(),
            courses_path: "/learner/courses".to_string(),
        }
    }
}

impl PlatformConfig {
    /// Validates the platform settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("auth.platform.base_url must not be empty".into());
        }
        if self.domain.is_empty() {
            return Err("auth.platform.domain must not be empty".into());
        }
        if !self.login_path.starts_with('/') {
            return Err("auth.platform.login_path must start with '/'".into());
        }
        if !self.courses_path.starts_with('/') {
            return Err("auth.platform.courses_path must start with '/'".into());
        }
        Ok(())
    }

    /// Builds the per-tenant login URL carrying the recovery hint.
    #[must_use]
    pub fn login_url(&self, subaccount_id: &str, unique_id: &str) -> String {
        format!(
            "https://{}.{}{}?state={}",
            subaccount_id,
            self.domain,
            self.login_path,
            urlencoding::encode(unique_id)
        )
    }

    /// Builds the learner course listing URL for the legacy callback.
    #[must_use]
    pub fn courses_url(&self, subaccount_id: &str) -> String {
        format!(
            "{}/{}{}",
            self.base_url.trim_end_matches('/'),
            subaccount_id,
            self.courses_path
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        AuthConfig::default().validate().expect("defaults valid");
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let cfg = AuthConfig {
            access_token_lifetime: Duration::ZERO,
            ..AuthConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_login_url_encodes_hint() {
        let platform = PlatformConfig::default();
        assert_eq!(
            platform.login_url("acme", "2019513-AIR-G-48"),
            "https://acme.bridgeapp.com/login?state=2019513-AIR-G-48"
        );
        assert_eq!(
            platform.login_url("acme", "a b"),
            "https://acme.bridgeapp.com/login?state=a%20b"
        );
    }

    #[test]
    fn test_courses_url() {
        let platform = PlatformConfig::default();
        assert_eq!(
            platform.courses_url("acme"),
            "https://safetynow.bridgeapp.com/acme/learner/courses"
        );
    }
}
