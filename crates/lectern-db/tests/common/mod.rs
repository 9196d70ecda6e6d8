//! Common test utilities for lectern-db integration tests.
//!
//! All tests here require a real database and are marked with
//! `#[ignore]`; run them with `TEST_DATABASE_URL` set and
//! `cargo test -- --ignored`.

use lectern_db::{run_migrations, DbPool};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Connect to the test database and apply migrations.
pub async fn setup_pool() -> PgPool {
    let url = std::env::var("TEST_DATABASE_URL")
        .expect("TEST_DATABASE_URL must be set for database tests");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("failed to connect to test database");

    run_migrations(&DbPool::from_pool(pool.clone()))
        .await
        .expect("migrations failed");

    pool
}
