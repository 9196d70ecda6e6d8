//! Database connection pool.

use crate::config::DbConfig;
use crate::error::DbError;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Shared connection pool for the OAuth2 provider store.
///
/// The pool is created once at startup and handed to the storage services;
/// it is read-only after construction.
#[derive(Debug, Clone)]
pub struct DbPool {
    inner: PgPool,
}

impl DbPool {
    /// Connect to Postgres using the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::ConnectionFailed`] if the pool cannot be
    /// established.
    pub async fn connect(config: &DbConfig) -> Result<Self, DbError> {
        let inner = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await
            .map_err(DbError::ConnectionFailed)?;

        tracing::info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        Ok(Self { inner })
    }

    /// Wrap an existing pool, e.g. one shared with the host application.
    #[must_use]
    pub fn from_pool(inner: PgPool) -> Self {
        Self { inner }
    }

    /// Access the underlying `SQLx` pool.
    #[must_use]
    pub fn inner(&self) -> &PgPool {
        &self.inner
    }
}
