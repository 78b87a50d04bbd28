//! Account entity.
//!
//! An [`Account`] links a legacy-site member (identified by their stable
//! external `unique_id`) to a Bridge platform subaccount. It is the root
//! entity of the data model: access logs, sync tasks, authorization codes
//! and access tokens all reference exactly one account.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// A legacy-site member mapped to a Bridge subaccount.
///
/// Accounts are created or updated idempotently on every inbound login
/// notification, keyed by `unique_id`. They are never hard-deleted by the
/// core; deactivation is a flag flip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Internal row identifier.
    pub id: Uuid,

    /// Stable external identifier (e.g. `2019513-AIR-G-48`).
    /// The sole external join key; all identity claims derive from it.
    pub unique_id: String,

    /// Bridge platform subaccount (tenant/subdomain) identifier.
    pub subaccount_id: String,

    /// Member email address.
    pub email: String,

    /// Member first name.
    pub first_name: String,

    /// Member last name.
    pub last_name: String,

    /// Inactive accounts are refused by the session bridge.
    pub is_active: bool,

    /// Timestamp when the account was first seen.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,

    /// Timestamp of the last update from a login notification.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Account {
    /// Creates a new active account from an upsert payload.
    #[must_use]
    pub fn new(unique_id: impl Into<String>, fields: AccountFields) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: Uuid::new_v4(),
            unique_id: unique_id.into(),
            subaccount_id: fields.subaccount_id,
            email: fields.email,
            first_name: fields.first_name,
            last_name: fields.last_name,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites the mutable profile fields with the given payload.
    ///
    /// This is an unconditional last-writer-wins overwrite: the legacy site
    /// is the source of truth, so fields in the payload always replace the
    /// stored values.
    pub fn apply(&mut self, fields: AccountFields) {
        self.email = fields.email;
        self.first_name = fields.first_name;
        self.last_name = fields.last_name;
        self.subaccount_id = fields.subaccount_id;
        self.updated_at = OffsetDateTime::now_utc();
    }
}

/// The mutable profile fields carried by a login notification.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountFields {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub subaccount_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(email: &str) -> AccountFields {
        AccountFields {
            email: email.to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            subaccount_id: "acme".to_string(),
        }
    }

    #[test]
    fn test_new_account_is_active() {
        let account = Account::new("2019513-AIR-G-48", fields("ada@example.com"));
        assert!(account.is_active);
        assert_eq!(account.unique_id, "2019513-AIR-G-48");
        assert_eq!(account.email, "ada@example.com");
    }

    #[test]
    fn test_apply_overwrites_all_fields() {
        let mut account = Account::new("2019513-AIR-G-48", fields("old@example.com"));
        let before = account.updated_at;

        account.apply(AccountFields {
            email: "new@example.com".to_string(),
            first_name: String::new(),
            last_name: String::new(),
            subaccount_id: "other".to_string(),
        });

        // Last writer wins, even when replacing with empty values.
        assert_eq!(account.email, "new@example.com");
        assert_eq!(account.first_name, "");
        assert_eq!(account.subaccount_id, "other");
        assert!(account.updated_at >= before);
    }
}
