//! Authentication and authorization error types.
//!
//! Every public operation in this crate returns a definite success/failure
//! outcome; nothing crosses a component boundary as an unhandled fault.

use std::fmt;

/// Errors that can occur during authentication and authorization operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The request is missing parameters or otherwise malformed.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Description of why the request is invalid.
        message: String,
    },

    /// A signature did not verify against the configured secret.
    #[error("Invalid signature")]
    InvalidSignature,

    /// A login notification fell outside the replay/freshness window.
    #[error("Notification expired")]
    NotificationExpired,

    /// The request lacks valid authentication credentials.
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Description of why the request is unauthorized.
        message: String,
    },

    /// The caller's identity could not be established or is not permitted.
    /// Deliberately undifferentiated on adversary-reachable paths.
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Description of why access is forbidden.
        message: String,
    },

    /// A record referenced by a trusted internal redirect does not exist.
    #[error("Not found: {message}")]
    NotFound {
        /// Description of what was not found.
        message: String,
    },

    /// The auth configuration is invalid (e.g. no active client).
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
    },

    /// An error occurred while storing or retrieving auth data.
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage error.
        message: String,
    },

    /// An unexpected internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl AuthError {
    /// Creates a new `InvalidRequest` error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates a new `Unauthorized` error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Creates a new `Forbidden` error.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Creates a new `NotFound` error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Creates a new `Configuration` error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a new `Storage` error.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a client error (4xx category).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest { .. }
                | Self::InvalidSignature
                | Self::NotificationExpired
                | Self::Unauthorized { .. }
                | Self::Forbidden { .. }
                | Self::NotFound { .. }
                | Self::Configuration { .. }
        )
    }

    /// Returns `true` if this is a server error.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Storage { .. } | Self::Internal { .. })
    }

    /// Returns the error category for logging/monitoring purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidRequest { .. } => ErrorCategory::Validation,
            Self::InvalidSignature => ErrorCategory::Authentication,
            Self::NotificationExpired => ErrorCategory::Authentication,
            Self::Unauthorized { .. } => ErrorCategory::Authentication,
            Self::Forbidden { .. } => ErrorCategory::Authorization,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Storage { .. } => ErrorCategory::Infrastructure,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Categories of authentication/authorization errors for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Authentication-related errors (identity verification).
    Authentication,
    /// Authorization-related errors (permission checks).
    Authorization,
    /// Request validation errors.
    Validation,
    /// Missing records on trusted paths.
    NotFound,
    /// Configuration errors.
    Configuration,
    /// Infrastructure/storage errors.
    Infrastructure,
    /// Internal server errors.
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authentication => write!(f, "authentication"),
            Self::Authorization => write!(f, "authorization"),
            Self::Validation => write!(f, "validation"),
            Self::NotFound => write!(f, "not_found"),
            Self::Configuration => write!(f, "configuration"),
            Self::Infrastructure => write!(f, "infrastructure"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

impl From<ohs_bridge_core::CoreError> for AuthError {
    fn from(err: ohs_bridge_core::CoreError) -> Self {
        match err {
            ohs_bridge_core::CoreError::AccountNotFound { unique_id } => {
                Self::not_found(format!("account {unique_id}"))
            }
            ohs_bridge_core::CoreError::Configuration(message) => Self::Configuration { message },
            other => Self::internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AuthError::invalid_request("missing client_id");
        assert_eq!(err.to_string(), "Invalid request: missing client_id");

        let err = AuthError::forbidden("invalid credentials");
        assert_eq!(err.to_string(), "Forbidden: invalid credentials");

        assert_eq!(AuthError::InvalidSignature.to_string(), "Invalid signature");
    }

    #[test]
    fn test_error_predicates() {
        assert!(AuthError::InvalidSignature.is_client_error());
        assert!(AuthError::configuration("no active client").is_client_error());
        assert!(AuthError::storage("down").is_server_error());
        assert!(!AuthError::storage("down").is_client_error());
    }

    #[test]
    fn test_error_category() {
        assert_eq!(
            AuthError::InvalidSignature.category(),
            ErrorCategory::Authentication
        );
        assert_eq!(
            AuthError::forbidden("nope").category(),
            ErrorCategory::Authorization
        );
        assert_eq!(
            AuthError::invalid_request("x").category(),
            ErrorCategory::Validation
        );
        assert_eq!(ErrorCategory::Validation.to_string(), "validation");
    }
}
