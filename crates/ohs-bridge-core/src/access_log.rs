//! Access log entries.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Append-only record of a user access attempt.
///
/// Entries are written once and never mutated or deleted by the core;
/// they exist purely as an audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessLog {
    /// Entry identifier.
    pub id: Uuid,

    /// Account this access refers to.
    pub account_id: Uuid,

    /// Timestamp of the access attempt.
    #[serde(with = "time::serde::rfc3339")]
    pub access_time: OffsetDateTime,

    /// Client IP address, as reported by proxy headers when present.
    pub client_ip: Option<String>,

    /// Raw User-Agent header value.
    pub user_agent: String,

    /// Whether the access attempt succeeded.
    pub success: bool,

    /// Error detail for failed attempts.
    pub error_message: String,
}

impl AccessLog {
    /// Creates a successful access entry for the given account.
    #[must_use]
    pub fn success(account_id: Uuid, client_ip: Option<String>, user_agent: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            access_time: OffsetDateTime::now_utc(),
            client_ip,
            user_agent,
            success: true,
            error_message: String::new(),
        }
    }

    /// Creates a failed access entry for the given account.
    #[must_use]
    pub fn failure(
        account_id: Uuid,
        client_ip: Option<String>,
        user_agent: String,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            access_time: OffsetDateTime::now_utc(),
            client_ip,
            user_agent,
            success: false,
            error_message: error_message.into(),
        }
    }
}
