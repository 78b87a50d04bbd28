//! Browser session records.
//!
//! The session bridge converts a validated legacy login into a short-lived
//! authenticated browser session. The session mirrors the account's profile
//! so the authorize endpoint can act as if a local principal were logged in,
//! even though the next request arrives from a different origin.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use ohs_bridge_core::Account;

/// A server-side browser session bound to an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserSession {
    /// Opaque session token carried by the cookie.
    pub token: String,

    /// Account row identifier.
    pub account_id: Uuid,

    /// Account external identifier, stored redundantly so identity can be
    /// recovered even if the row lookup fails mid-flow.
    pub unique_id: String,

    /// Mirrored profile fields (the session-scoped local principal).
    pub email: String,
    pub first_name: String,
    pub last_name: String,

    /// Timestamp when the session was established.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,

    /// Expiry after which the session is no longer resolvable.
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
}

impl BrowserSession {
    /// Establishes a new session mirroring the given account.
    #[must_use]
    pub fn establish(account: &Account, lifetime: time::Duration) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            token: Uuid::new_v4().to_string(),
            account_id: account.id,
            unique_id: account.unique_id.clone(),
            email: account.email.clone(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            created_at: now,
            expires_at: now + lifetime,
        }
    }

    /// Returns `true` if the session expired at or before `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ohs_bridge_core::AccountFields;

    #[test]
    fn test_establish_mirrors_account() {
        let account = Account::new(
            "2019513-AIR-G-48",
            AccountFields {
                email: "ada@example.com".to_string(),
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                subaccount_id: "acme".to_string(),
            },
        );
        let session = BrowserSession::establish(&account, time::Duration::minutes(10));
        assert_eq!(session.account_id, account.id);
        assert_eq!(session.unique_id, "2019513-AIR-G-48");
        assert_eq!(session.email, "ada@example.com");
        assert!(!session.is_expired_at(session.created_at));
    }
}
