//! OAuth client credentials for the legacy-site integration.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Credentials shared with the legacy site and the downstream platform.
///
/// Exactly one active client is expected at a time. Rotation is
/// create-new-then-deactivate; the secret of an existing client is never
/// regenerated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthClient {
    /// Internal row identifier.
    pub id: Uuid,

    /// Operator-facing name.
    pub name: String,

    /// OAuth client identifier presented by the downstream platform.
    pub client_id: String,

    /// Shared secret: signs login notifications and authenticates the
    /// platform at the token endpoint.
    pub client_secret: String,

    /// Downstream platform base URL.
    pub base_url: String,

    /// Inactive clients are ignored by every lookup.
    pub is_active: bool,

    /// Timestamp when the client was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl AuthClient {
    /// Creates a new active client with generated credentials.
    #[must_use]
    pub fn generate(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            client_id: generate_client_id(),
            client_secret: generate_client_secret(),
            base_url: base_url.into(),
            is_active: true,
            created_at: OffsetDateTime::now_utc(),
        }
    }
}

/// Generates a 16-character hex client identifier (8 random bytes).
#[must_use]
pub fn generate_client_id() -> String {
    let mut bytes = [0u8; 8];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Generates a 32-character hex client secret (16 random bytes).
#[must_use]
pub fn generate_client_secret() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_credential_shape() {
        let client = AuthClient::generate("wordpress", "https://safetynow.bridgeapp.com");
        assert!(client.is_active);
        assert_eq!(client.client_id.len(), 16);
        assert_eq!(client.client_secret.len(), 32);
        assert!(client.client_id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_credentials_are_unique() {
        assert_ne!(generate_client_secret(), generate_client_secret());
        assert_ne!(generate_client_id(), generate_client_id());
    }
}
