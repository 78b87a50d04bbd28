use thiserror::Error;

/// Core error types for OHS Bridge domain operations
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid unique id: {0}")]
    InvalidUniqueId(String),

    #[error("Account not found: {unique_id}")]
    AccountNotFound { unique_id: String },

    #[error("Account conflict: {unique_id} already exists")]
    AccountConflict { unique_id: String },

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Time parsing error: {0}")]
    TimeError(#[from] time::error::Parse),

    #[error("UUID error: {0}")]
    UuidError(#[from] uuid::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CoreError {
    /// Create a new InvalidUniqueId error
    pub fn invalid_unique_id(id: impl Into<String>) -> Self {
        Self::InvalidUniqueId(id.into())
    }

    /// Create a new AccountNotFound error
    pub fn account_not_found(unique_id: impl Into<String>) -> Self {
        Self::AccountNotFound {
            unique_id: unique_id.into(),
        }
    }

    /// Create a new AccountConflict error
    pub fn account_conflict(unique_id: impl Into<String>) -> Self {
        Self::AccountConflict {
            unique_id: unique_id.into(),
        }
    }

    /// Create a new Configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::account_not_found("2019513-AIR-G-48");
        assert_eq!(err.to_string(), "Account not found: 2019513-AIR-G-48");

        let err = CoreError::configuration("no active client");
        assert_eq!(err.to_string(), "Configuration error: no active client");
    }
}
