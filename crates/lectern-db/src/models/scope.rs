//! `OAuth2` scope registry model.

use sqlx::FromRow;

/// A registered `OAuth2` scope.
#[derive(Debug, Clone, FromRow)]
pub struct OAuthScope {
    /// Scope name.
    pub scope: String,

    /// Whether the scope is granted when a request names none.
    pub is_default: bool,
}

impl OAuthScope {
    /// Check that every given name exists in the registry.
    ///
    /// Counts matching rows and compares against the number of names
    /// given, so duplicates in the input fail the check. An empty input is
    /// vacuously satisfied; callers decide what an empty request means.
    pub async fn exists_all<'e, E>(executor: E, names: &[&str]) -> Result<bool, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        if names.is_empty() {
            return Ok(true);
        }

        let owned: Vec<String> = names.iter().map(|s| (*s).to_string()).collect();
        let count: i64 = sqlx::query_scalar(
            r"
            SELECT COUNT(*) FROM oauth_scope WHERE scope = ANY($1)
            ",
        )
        .bind(&owned)
        .fetch_one(executor)
        .await?;

        Ok(count as usize == names.len())
    }

    /// Names of all scopes flagged as default, ordered for determinism.
    pub async fn find_default_names<'e, E>(executor: E) -> Result<Vec<String>, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_scalar(
            r"
            SELECT scope FROM oauth_scope WHERE is_default = TRUE ORDER BY scope
            ",
        )
        .fetch_all(executor)
        .await
    }

    /// Insert a scope unless it already exists.
    ///
    /// Returns whether a row was inserted. Used by the install bootstrap.
    pub async fn insert_if_missing<'e, E>(
        executor: E,
        name: &str,
        is_default: bool,
    ) -> Result<bool, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        let result = sqlx::query(
            r"
            INSERT INTO oauth_scope (scope, is_default)
            VALUES ($1, $2)
            ON CONFLICT (scope) DO NOTHING
            ",
        )
        .bind(name)
        .bind(is_default)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
