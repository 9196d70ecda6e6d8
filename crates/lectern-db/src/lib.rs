//! # lectern-db
//!
//! Postgres persistence layer for the Lectern OAuth2/OIDC provider.
//!
//! Provides the connection pool, embedded schema migrations, the
//! install-time bootstrap (default scopes and signing key), and one model
//! module per persisted entity. Model query methods are generic over the
//! executor so they compose with pools, connections, and transactions
//! alike.
//!
//! ## Example
//!
//! ```rust,ignore
//! use lectern_db::{run_install, run_migrations, DbConfig, DbPool};
//!
//! let config = DbConfig::from_env()?;
//! let pool = DbPool::connect(&config).await?;
//! run_migrations(&pool).await?;
//! run_install(pool.inner(), None).await?;
//! ```

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod migrations;
pub mod models;
pub mod pool;

pub use bootstrap::{run_install, DefaultSigningKey, InstallReport, DEFAULT_SCOPES};
pub use config::DbConfig;
pub use error::DbError;
pub use migrations::run_migrations;
pub use pool::DbPool;
