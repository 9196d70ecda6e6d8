//! `OAuth2` access token entity model.

use crate::models::UpsertOutcome;
use chrono::Utc;
use lectern_core::UserId;
use sqlx::FromRow;

/// A persisted `OAuth2` access token.
///
/// Expiry is stored as a unix timestamp and is the caller's responsibility
/// to check: an expired row may still be physically present until the host
/// purges it.
#[derive(Debug, Clone, FromRow)]
pub struct AccessToken {
    /// The token value.
    pub access_token: String,

    /// Client the token was issued to.
    pub client_id: String,

    /// Owner of the token.
    pub user_id: i64,

    /// Expiry as a unix timestamp (seconds).
    pub expires: i64,

    /// Granted scopes (space-separated).
    pub scope: Option<String>,
}

impl AccessToken {
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
            SELECT * FROM oauth_access_token WHERE access_token = $1
            ",
        )
        .bind(token)
        .fetch_optional(executor)
        .await
    }

    /// Atomically insert or update a token row.
    ///
    /// A single `ON CONFLICT` statement keeps concurrent writers from
    /// racing a check-then-insert; the returned outcome reports which path
    /// was taken so the caller can emit the matching lifecycle event.
    pub async fn upsert<'e, E>(
        executor: E,
        input: &NewAccessToken,
    ) -> Result<UpsertOutcome, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        let inserted: bool = sqlx::query_scalar(
            r"
            INSERT INTO oauth_access_token (access_token, client_id, user_id, expires, scope)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (access_token) DO UPDATE
            SET client_id = EXCLUDED.client_id,
                user_id = EXCLUDED.user_id,
                expires = EXCLUDED.expires,
                scope = EXCLUDED.scope
            RETURNING (xmax = 0)
            ",
        )
        .bind(&input.access_token)
        .bind(&input.client_id)
        .bind(input.user_id.as_i64())
        .bind(input.expires)
        .bind(&input.scope)
        .fetch_one(executor)
        .await?;

        Ok(if inserted {
            UpsertOutcome::Created
        } else {
            UpsertOutcome::Updated
        })
    }
}

/// Data for storing an access token.
#[derive(Debug, Clone)]
pub struct NewAccessToken {
    pub access_token: String,
    pub client_id: String,
    pub user_id: UserId,
    pub expires: i64,
    pub scope: Option<String>,
}
