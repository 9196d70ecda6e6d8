//! `OAuth2` refresh token entity model.
//!
//! Refresh tokens rotate: exchanging one issues a fresh token and the old
//! row is deleted. Insert is the only write path; a token value is never
//! reused across rows.

use chrono::Utc;
use lectern_core::UserId;
use sqlx::FromRow;

/// A persisted `OAuth2` refresh token.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshToken {
    /// The token value.
    pub refresh_token: String,

    /// Client the token was issued to.
    pub client_id: String,

    /// Owner of the token.
    pub user_id: i64,

    /// Expiry as a unix timestamp (seconds).
    pub expires: i64,

    /// Granted scopes (space-separated).
    pub scope: Option<String>,
}

impl RefreshToken {
    /// Get the owner as a typed `UserId`.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        UserId::from_i64(self.user_id)
    }

    /// Check if the token has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.expires
    }

    /// Get the scopes as a vector.
    #[must_use]
    pub fn scopes(&self) -> Vec<&str> {
        self.scope
            .as_deref()
            .map(|s| s.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Look up a token by its value.
    pub async fn find_by_token<'e, E>(executor: E, token: &str) -> Result<Option<Self>, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as(
            r"
            SELECT * FROM oauth_refresh_token WHERE refresh_token = $1
            ",
        )
        .bind(token)
        .fetch_optional(executor)
        .await
    }

    /// Insert a new token row.
    ///
    /// No update path exists on purpose; a duplicate token value is a
    /// uniqueness violation surfaced by the store.
    pub async fn insert<'e, E>(executor: E, input: &NewRefreshToken) -> Result<(), sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query(
            r"
            INSERT INTO oauth_refresh_token (refresh_token, client_id, user_id, expires, scope)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(&input.refresh_token)
        .bind(&input.client_id)
        .bind(input.user_id.as_i64())
        .bind(input.expires)
        .bind(&input.scope)
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Delete a token after rotation.
    ///
    /// Returns whether a row was actually removed. A store error here must
    /// propagate to the caller: an unrotated refresh token stays usable,
    /// which is a security failure, not a degradation.
    pub async fn delete<'e, E>(executor: E, token: &str) -> Result<bool, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        let result = sqlx::query(
            r"
            DELETE FROM oauth_refresh_token WHERE refresh_token = $1
            ",
        )
        .bind(token)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Data for storing a refresh token.
#[derive(Debug, Clone)]
pub struct NewRefreshToken {
    pub refresh_token: String,
    pub client_id: String,
    pub user_id: UserId,
    pub expires: i64,
    pub scope: Option<String>,
}
