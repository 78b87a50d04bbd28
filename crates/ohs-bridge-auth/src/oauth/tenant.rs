//! Tenant subdomain derivation for the interstitial continuation.

use regex::Regex;

use crate::AuthResult;
use crate::error::AuthError;
use ohs_bridge_core::Account;

/// Strategy for deriving the platform tenant subdomain an account should
/// land on after authorization.
pub trait TenantResolver: Send + Sync {
    fn resolve(&self, redirect_uri: &str, account: &Account) -> String;
}

/// Convention-based resolver: take the subdomain out of the redirect URI
/// and append the platform suffix when it is missing. Falls back to the
/// account's subaccount id when the redirect URI does not match the
/// platform domain at all.
pub struct SuffixTenantResolver {
    host_pattern: Regex,
    suffix: String,
}

impl SuffixTenantResolver {
    pub fn new(platform_domain: &str, suffix: impl Into<String>) -> AuthResult<Self> {
        let pattern = format!(r"^https://([^./]+)\.{}", regex::escape(platform_domain));
        let host_pattern = Regex::new(&pattern)
            .map_err(|e| AuthError::configuration(format!("bad platform domain: {e}")))?;
        Ok(Self {
            host_pattern,
            suffix: suffix.into(),
        })
    }
}

impl TenantResolver for SuffixTenantResolver {
    fn resolve(&self, redirect_uri: &str, account: &Account) -> String {
        if let Some(captures) = self.host_pattern.captures(redirect_uri) {
            let subdomain = &captures[1];
            let dashed = format!("-{}", self.suffix);
            if subdomain == self.suffix || subdomain.ends_with(&dashed) {
                subdomain.to_string()
            } else {
                format!("{subdomain}{dashed}")
            }
        } else {
            account.subaccount_id.clone()
        }
    }
}
