//! Login notification ingestion.
//!
//! The legacy site pushes a signed notification every time a member logs
//! in. Ingestion verifies the signature and freshness window, then upserts
//! the account, appends an audit entry and enqueues a sync task.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::AuthResult;
use crate::error::AuthError;
use crate::request_meta::RequestMeta;
use crate::signature::{self, SignatureError};
use crate::storage::{
    AccessLogStorage, AccountStorage, ClientStorage, SideCache, SyncTaskStorage,
};
use ohs_bridge_core::{AccessLog, Account, AccountFields, SyncTask, TaskType};

/// Typed view of an inbound login notification.
///
/// Signature verification happens over the raw JSON object (in the key
/// order the legacy site sent); this struct is extracted afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginNotification {
    pub unique_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub subaccount_id: String,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub signature: String,
}

impl LoginNotification {
    fn into_fields(self) -> AccountFields {
        AccountFields {
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            subaccount_id: self.subaccount_id,
        }
    }
}

/// Service absorbing inbound login notifications.
#[derive(Clone)]
pub struct LoginService {
    clients: Arc<dyn ClientStorage>,
    accounts: Arc<dyn AccountStorage>,
    access_logs: Arc<dyn AccessLogStorage>,
    sync_tasks: Arc<dyn SyncTaskStorage>,
    cache: Arc<dyn SideCache>,
    freshness_window: Duration,
}

impl LoginService {
    /// Creates a new login service.
    pub fn new(
        clients: Arc<dyn ClientStorage>,
        accounts: Arc<dyn AccountStorage>,
        access_logs: Arc<dyn AccessLogStorage>,
        sync_tasks: Arc<dyn SyncTaskStorage>,
        cache: Arc<dyn SideCache>,
        freshness_window: Duration,
    ) -> Self {
        Self {
            clients,
            accounts,
            access_logs,
            sync_tasks,
            cache,
            freshness_window,
        }
    }

    /// Processes a raw login notification payload.
    ///
    /// The payload must be a JSON object; the signature is recomputed over
    /// every field except `signature` itself, preserving payload order.
    pub async fn process(
        &self,
        payload: &serde_json::Value,
        meta: &RequestMeta,
    ) -> AuthResult<Account> {
        let object = payload
            .as_object()
            .ok_or_else(|| AuthError::invalid_request("payload must be a JSON object"))?;

        let client = self
            .clients
            .find_active()
            .await?
            .ok_or_else(|| AuthError::configuration("no active authentication configured"))?;

        let signature = object
            .get("signature")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AuthError::invalid_request("missing signature"))?;

        let mut signed_fields = signature::fields_from_json(object);
        signed_fields.shift_remove("signature");

        match signature::verify(&signed_fields, &client.client_secret, signature) {
            Ok(()) => {}
            Err(SignatureError::Mismatch | SignatureError::MalformedSignature) => {
                warn!(client_id = %client.client_id, "Login notification signature mismatch");
                return Err(AuthError::InvalidSignature);
            }
            Err(SignatureError::MissingMarker) => {
                return Err(AuthError::InvalidSignature);
            }
        }

        let notification: LoginNotification = serde_json::from_value(payload.clone())
            .map_err(|e| AuthError::invalid_request(format!("malformed payload: {e}")))?;

        if notification.unique_id.is_empty() {
            return Err(AuthError::invalid_request("missing unique_id"));
        }

        let now = OffsetDateTime::now_utc();
        let skew = (now.unix_timestamp() - notification.timestamp).unsigned_abs();
        if skew > self.freshness_window.as_secs() {
            debug!(
                unique_id = %notification.unique_id,
                skew_seconds = skew,
                "Login notification outside freshness window"
            );
            return Err(AuthError::NotificationExpired);
        }

        let unique_id = notification.unique_id.clone();
        let account = self
            .accounts
            .upsert(&unique_id, notification.into_fields())
            .await?;

        self.access_logs
            .append(&AccessLog::success(
                account.id,
                meta.client_ip.clone(),
                meta.user_agent.clone(),
            ))
            .await?;

        self.sync_tasks
            .enqueue(&SyncTask::pending(account.id, TaskType::User))
            .await?;

        // Best-effort hint for the external worker; never load-bearing.
        self.cache
            .put(&format!("ohs:last_login:{}", account.unique_id), &account.id.to_string())
            .await;

        info!(
            unique_id = %account.unique_id,
            account_id = %account.id,
            "Login notification absorbed"
        );
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::FieldMap;
    use crate::storage::NoopCache;
    use crate::types::AuthClient;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use tokio::sync::RwLock;
    use uuid::Uuid;

    struct TestStore {
        client: Option<AuthClient>,
        accounts: RwLock<HashMap<String, Account>>,
        logs: RwLock<Vec<AccessLog>>,
        tasks: RwLock<Vec<SyncTask>>,
    }

    impl TestStore {
        fn with_client(client: AuthClient) -> Arc<Self> {
            Arc::new(Self {
                client: Some(client),
                accounts: RwLock::new(HashMap::new()),
                logs: RwLock::new(Vec::new()),
                tasks: RwLock::new(Vec::new()),
            })
        }

        fn without_client() -> Arc<Self> {
            Arc::new(Self {
                client: None,
                accounts: RwLock::new(HashMap::new()),
                logs: RwLock::new(Vec::new()),
                tasks: RwLock::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ClientStorage for TestStore {
        async fn find_active(&self) -> AuthResult<Option<AuthClient>> {
            Ok(self.client.clone())
        }
        async fn find_by_client_id(&self, _client_id: &str) -> AuthResult<Option<AuthClient>> {
            Ok(self.client.clone())
        }
        async fn create(&self, client: &AuthClient) -> AuthResult<AuthClient> {
            Ok(client.clone())
        }
    }

    #[async_trait]
    impl AccountStorage for TestStore {
        async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<Account>> {
            Ok(self
                .accounts
                .read()
                .await
                .values()
                .find(|a| a.id == id)
                .cloned())
        }
        async fn find_by_unique_id(&self, unique_id: &str) -> AuthResult<Option<Account>> {
            Ok(self.accounts.read().await.get(unique_id).cloned())
        }
        async fn find_by_email(&self, email: &str) -> AuthResult<Option<Account>> {
            Ok(self
                .accounts
                .read()
                .await
                .values()
                .find(|a| a.email == email)
                .cloned())
        }
        async fn upsert(&self, unique_id: &str, fields: AccountFields) -> AuthResult<Account> {
            let mut accounts = self.accounts.write().await;
            let account = accounts
                .entry(unique_id.to_string())
                .and_modify(|a| a.apply(fields.clone()))
                .or_insert_with(|| Account::new(unique_id, fields));
            Ok(account.clone())
        }
    }

    #[async_trait]
    impl AccessLogStorage for TestStore {
        async fn append(&self, entry: &AccessLog) -> AuthResult<()> {
            self.logs.write().await.push(entry.clone());
            Ok(())
        }
    }

    #[async_trait]
    impl SyncTaskStorage for TestStore {
        async fn enqueue(&self, task: &SyncTask) -> AuthResult<()> {
            self.tasks.write().await.push(task.clone());
            Ok(())
        }
        async fn list_for_account(&self, account_id: Uuid) -> AuthResult<Vec<SyncTask>> {
            Ok(self
                .tasks
                .read()
                .await
                .iter()
                .filter(|t| t.account_id == account_id)
                .cloned()
                .collect())
        }
    }

    fn service(store: &Arc<TestStore>) -> LoginService {
        LoginService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            Arc::new(NoopCache),
            Duration::from_secs(300),
        )
    }

    fn signed_payload(secret: &str, unique_id: &str, timestamp: i64) -> serde_json::Value {
        let mut payload = serde_json::json!({
            "unique_id": unique_id,
            "email": "ada@example.com",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "subaccount_id": "acme",
            "timestamp": timestamp,
        });
        let fields: FieldMap = signature::fields_from_json(payload.as_object().unwrap());
        let sig = signature::sign(&fields, secret);
        payload["signature"] = serde_json::Value::String(sig);
        payload
    }

    fn test_client() -> AuthClient {
        AuthClient::generate("wordpress", "https://safetynow.bridgeapp.com")
    }

    #[tokio::test]
    async fn test_valid_notification_creates_account_log_and_task() {
        let client = test_client();
        let secret = client.client_secret.clone();
        let store = TestStore::with_client(client);
        let payload = signed_payload(
            &secret,
            "2019513-AIR-G-48",
            OffsetDateTime::now_utc().unix_timestamp(),
        );

        let account = service(&store).process(&payload, &RequestMeta::default()).await.unwrap();
        assert_eq!(account.unique_id, "2019513-AIR-G-48");
        assert_eq!(account.email, "ada@example.com");

        let logs = store.logs.read().await;
        assert_eq!(logs.len(), 1);
        assert!(logs[0].success);

        let tasks = store.tasks.read().await;
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].task_type, TaskType::User);
        assert_eq!(tasks[0].status, ohs_bridge_core::TaskStatus::Pending);
    }

    #[tokio::test]
    async fn test_no_active_client_is_configuration_fault() {
        let store = TestStore::without_client();
        let payload = signed_payload("whatever", "u1", OffsetDateTime::now_utc().unix_timestamp());
        let err = service(&store)
            .process(&payload, &RequestMeta::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Configuration { .. }));
    }

    #[tokio::test]
    async fn test_bad_signature_rejected() {
        let client = test_client();
        let store = TestStore::with_client(client);
        let payload = signed_payload(
            "wrong-secret",
            "u1",
            OffsetDateTime::now_utc().unix_timestamp(),
        );
        let err = service(&store)
            .process(&payload, &RequestMeta::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidSignature));
        assert!(store.logs.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_replay_window_boundaries() {
        let client = test_client();
        let secret = client.client_secret.clone();
        let store = TestStore::with_client(client);
        let svc = service(&store);
        let now = OffsetDateTime::now_utc().unix_timestamp();

        // 299 seconds old: accepted.
        let fresh = signed_payload(&secret, "u-fresh", now - 299);
        assert!(svc.process(&fresh, &RequestMeta::default()).await.is_ok());

        // 301 seconds old: rejected as expired.
        let stale = signed_payload(&secret, "u-stale", now - 301);
        let err = svc.process(&stale, &RequestMeta::default()).await.unwrap_err();
        assert!(matches!(err, AuthError::NotificationExpired));

        // Future skew beyond the window is rejected too.
        let future = signed_payload(&secret, "u-future", now + 301);
        let err = svc.process(&future, &RequestMeta::default()).await.unwrap_err();
        assert!(matches!(err, AuthError::NotificationExpired));
    }

    #[tokio::test]
    async fn test_idempotent_upsert_latest_fields_win() {
        let client = test_client();
        let secret = client.client_secret.clone();
        let store = TestStore::with_client(client);
        let svc = service(&store);
        let now = OffsetDateTime::now_utc().unix_timestamp();

        let first = signed_payload(&secret, "u1", now - 10);
        svc.process(&first, &RequestMeta::default()).await.unwrap();

        let mut second = serde_json::json!({
            "unique_id": "u1",
            "email": "new@example.com",
            "first_name": "Grace",
            "last_name": "Hopper",
            "subaccount_id": "navy",
            "timestamp": now,
        });
        let fields = signature::fields_from_json(second.as_object().unwrap());
        second["signature"] = serde_json::Value::String(signature::sign(&fields, &secret));
        svc.process(&second, &RequestMeta::default()).await.unwrap();

        let accounts = store.accounts.read().await;
        assert_eq!(accounts.len(), 1);
        let account = accounts.get("u1").unwrap();
        assert_eq!(account.email, "new@example.com");
        assert_eq!(account.subaccount_id, "navy");

        // One access log row per notification.
        assert_eq!(store.logs.read().await.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_signature_rejected() {
        let client = test_client();
        let store = TestStore::with_client(client);
        let payload = serde_json::json!({
            "unique_id": "u1",
            "timestamp": OffsetDateTime::now_utc().unix_timestamp(),
        });
        let err = service(&store)
            .process(&payload, &RequestMeta::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidRequest { .. }));
    }
}
