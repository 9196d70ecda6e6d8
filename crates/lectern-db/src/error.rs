//! Error types for the lectern-db crate.
//!
//! Provides a unified error type that wraps `SQLx` errors with additional
//! context.

use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Failed to establish or acquire a database connection.
    ///
    /// This typically indicates network issues, invalid credentials,
    /// or the database server being unavailable.
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[source] sqlx::Error),

    /// A database migration failed to apply.
    ///
    /// Check the migration SQL for syntax errors or constraint violations.
    #[error("Migration failed: {0}")]
    MigrationFailed(#[source] sqlx::migrate::MigrateError),

    /// A database query failed to execute.
    #[error("Query failed: {0}")]
    QueryFailed(#[source] sqlx::Error),

    /// A required environment variable is not set.
    #[error("Missing required environment variable: {var}")]
    ConfigMissing {
        /// Name of the missing variable.
        var: String,
    },

    /// An environment variable holds an unusable value.
    #[error("Invalid value for {var}: {reason}")]
    ConfigInvalid {
        /// Name of the offending variable.
        var: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl DbError {
    /// Check if this error indicates a connection problem.
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(self, DbError::ConnectionFailed(_))
    }

    /// Check if this error indicates a migration problem.
    #[must_use]
    pub fn is_migration_error(&self) -> bool {
        matches!(self, DbError::MigrationFailed(_))
    }

    /// Check if this error indicates a query problem.
    #[must_use]
    pub fn is_query_error(&self) -> bool {
        matches!(self, DbError::QueryFailed(_))
    }

    /// Check if this error indicates a configuration problem.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            DbError::ConfigMissing { .. } | DbError::ConfigInvalid { .. }
        )
    }
}
