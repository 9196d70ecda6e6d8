//! Error types for the OAuth2 storage engine.

use lectern_events::EventError;
use thiserror::Error;

/// Storage engine errors.
///
/// Absent rows are not errors: lookups return `Option` and callers branch
/// on it. This enum covers store failures, capability gaps, and
/// misconfiguration.
#[derive(Debug, Error)]
pub enum OAuthError {
    /// A database query failed.
    ///
    /// Uniqueness violations on insert-only paths (refresh tokens) also
    /// surface here.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An event payload could not be serialized.
    #[error("Event error: {0}")]
    Event(#[from] EventError),

    /// The identity provider failed to answer.
    #[error("Identity provider error: {0}")]
    Identity(String),

    /// A contract operation this engine deliberately does not support.
    ///
    /// JWT replay-protection (jti) lookups fail with this rather than
    /// silently succeeding.
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    /// A required environment variable is not set.
    #[error("Missing required environment variable: {var}")]
    ConfigMissing {
        /// Name of the missing variable.
        var: String,
    },
}

impl OAuthError {
    /// Check if this error indicates a store problem.
    #[must_use]
    pub fn is_database_error(&self) -> bool {
        matches!(self, OAuthError::Database(_))
    }

    /// Check if this error marks an unsupported operation.
    #[must_use]
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, OAuthError::NotImplemented(_))
    }

    /// Check if this error indicates an identity provider problem.
    #[must_use]
    pub fn is_identity_error(&self) -> bool {
        matches!(self, OAuthError::Identity(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_implemented_display() {
        let err = OAuthError::NotImplemented("get_jti");
        assert_eq!(err.to_string(), "get_jti is not implemented");
        assert!(err.is_not_implemented());
        assert!(!err.is_database_error());
    }

    #[test]
    fn test_identity_display() {
        let err = OAuthError::Identity("directory unavailable".to_string());
        assert!(err.to_string().contains("directory unavailable"));
        assert!(err.is_identity_error());
    }
}
