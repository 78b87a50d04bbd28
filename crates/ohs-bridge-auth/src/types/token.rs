//! Bearer access tokens.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::code::generate_opaque;

/// A bearer credential granting read access to identity claims.
///
/// There is no revocation list; validity is solely `now < expires_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    /// Opaque high-entropy token value.
    pub token: String,

    /// Account the token was issued for.
    pub account_id: Uuid,

    /// Client the token was issued to.
    pub client_id: String,

    /// Timestamp when the token was issued.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,

    /// Expiry; the token is honored only before this instant.
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
}

impl AccessToken {
    /// Issues a fresh token for the given account and client.
    #[must_use]
    pub fn issue(account_id: Uuid, client_id: impl Into<String>, lifetime: time::Duration) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            token: generate_opaque(),
            account_id,
            client_id: client_id.into(),
            created_at: now,
            expires_at: now + lifetime,
        }
    }

    /// Returns `true` if the token expired at or before `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_sets_expiry() {
        let token = AccessToken::issue(Uuid::new_v4(), "client", time::Duration::hours(1));
        assert_eq!(token.expires_at - token.created_at, time::Duration::hours(1));
        assert!(!token.is_expired_at(token.created_at));
        assert!(token.is_expired_at(token.expires_at));
    }
}
