//! Startup seeding of the authentication client.

use std::sync::Arc;

use ohs_bridge_auth::storage::ClientStorage;
use ohs_bridge_auth::types::AuthClient;
use tracing::{info, warn};

use crate::config::BootstrapConfig;

/// Ensures an active client exists, creating one from the bootstrap
/// configuration when the store is empty.
///
/// Returns the active client so callers (and tests) can hand its
/// credentials to the legacy site.
pub async fn seed_client(
    clients: &Arc<dyn ClientStorage>,
    cfg: &BootstrapConfig,
) -> ohs_bridge_auth::AuthResult<AuthClient> {
    if let Some(existing) = clients.find_active().await? {
        info!(client_id = %existing.client_id, "Active client already present");
        return Ok(existing);
    }

    let mut client = AuthClient::generate(cfg.client_name.clone(), cfg.client_base_url.clone());
    match (&cfg.client_id, &cfg.client_secret) {
        (Some(id), Some(secret)) => {
            client.client_id = id.clone();
            client.client_secret = secret.clone();
            info!(client_id = %client.client_id, "Seeded client with pinned credentials");
        }
        _ => {
            // One-time disclosure; the secret is not retrievable later.
            warn!(
                client_id = %client.client_id,
                client_secret = %client.client_secret,
                "Seeded client with generated credentials, record the secret now"
            );
        }
    }
    clients.create(&client).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use ohs_bridge_auth_memory::InMemoryClientStorage;

    #[tokio::test]
    async fn test_seed_generates_when_empty() {
        let clients: Arc<dyn ClientStorage> = Arc::new(InMemoryClientStorage::new());
        let seeded = seed_client(&clients, &BootstrapConfig::default())
            .await
            .unwrap();
        assert_eq!(seeded.client_id.len(), 16);
        assert_eq!(seeded.client_secret.len(), 32);
        assert!(seeded.is_active);

        // Second run is a no-op returning the same client.
        let again = seed_client(&clients, &BootstrapConfig::default())
            .await
            .unwrap();
        assert_eq!(again.client_id, seeded.client_id);
    }

    #[tokio::test]
    async fn test_seed_uses_pinned_credentials() {
        let clients: Arc<dyn ClientStorage> = Arc::new(InMemoryClientStorage::new());
        let cfg = BootstrapConfig {
            client_id: Some("deadbeefdeadbeef".into()),
            client_secret: Some("s".repeat(32)),
            ..BootstrapConfig::default()
        };
        let seeded = seed_client(&clients, &cfg).await.unwrap();
        assert_eq!(seeded.client_id, "deadbeefdeadbeef");
    }
}
