//! Authorization codes.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// A single-use, short-lived credential exchanged for an access token.
///
/// The `used = false -> true` transition happens atomically with the
/// token-exchange lookup; see
/// [`AuthorizationCodeStorage::consume`](crate::storage::AuthorizationCodeStorage::consume).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizationCode {
    /// Opaque high-entropy code value.
    pub code: String,

    /// Account the code was minted for.
    pub account_id: Uuid,

    /// Client the code was minted for.
    pub client_id: String,

    /// Timestamp when the code was minted.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,

    /// Expiry; a code is consumable only before this instant.
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,

    /// Whether the code has been redeemed.
    pub used: bool,
}

impl AuthorizationCode {
    /// Mints a fresh code for the given account and client.
    #[must_use]
    pub fn mint(account_id: Uuid, client_id: impl Into<String>, lifetime: time::Duration) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            code: generate_opaque(),
            account_id,
            client_id: client_id.into(),
            created_at: now,
            expires_at: now + lifetime,
            used: false,
        }
    }

    /// Returns `true` if the code expired at or before `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        now >= self.expires_at
    }
}

/// Generates an opaque credential value.
///
/// 32 bytes of CSPRNG output, base64url-encoded without padding
/// (43 characters, 256 bits of entropy).
#[must_use]
pub fn generate_opaque() -> String {
    let mut bytes = [0u8; 32];
    rand::Rng::fill(&mut rand::thread_rng(), &mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_sets_expiry() {
        let code = AuthorizationCode::mint(Uuid::new_v4(), "client", time::Duration::minutes(5));
        assert!(!code.used);
        assert_eq!(code.expires_at - code.created_at, time::Duration::minutes(5));
        assert_eq!(code.code.len(), 43);
    }

    #[test]
    fn test_expiry_boundary() {
        let code = AuthorizationCode::mint(Uuid::new_v4(), "client", time::Duration::minutes(5));
        assert!(!code.is_expired_at(code.expires_at - time::Duration::seconds(1)));
        assert!(code.is_expired_at(code.expires_at));
    }

    #[test]
    fn test_codes_are_unique() {
        assert_ne!(generate_opaque(), generate_opaque());
    }
}
