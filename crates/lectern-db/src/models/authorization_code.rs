//! `OAuth2` authorization code entity model.
//!
//! Authorization codes are short-lived, single-use grants. The row is
//! deleted by the runtime immediately after a successful exchange; an
//! expired or already-consumed code must never validate.

use chrono::Utc;
use lectern_core::UserId;
use sqlx::FromRow;

/// PKCE code-challenge transformation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeChallengeMethod {
    /// The verifier is sent as-is.
    Plain,
    /// The verifier is hashed with SHA-256 and base64url-encoded.
    S256,
}

impl CodeChallengeMethod {
    /// Parse the persisted method name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "plain" => Some(Self::Plain),
            "S256" => Some(Self::S256),
            _ => None,
        }
    }

    /// The wire name of the method.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::S256 => "S256",
        }
    }
}

/// A persisted authorization code.
#[derive(Debug, Clone, FromRow)]
pub struct AuthorizationCode {
    /// The opaque code value.
    pub authorization_code: String,

    /// Client the code was issued to.
    pub client_id: String,

    /// User who granted the authorization.
    pub user_id: i64,

    /// Redirect URI the code is bound to.
    pub redirect_uri: String,

    /// Expiry as a unix timestamp (seconds).
    pub expires: i64,

    /// Granted scopes (space-separated).
    pub scope: Option<String>,

    /// OIDC ID token issued alongside the code, when the `openid` scope
    /// was requested.
    pub id_token: Option<String>,

    /// PKCE code challenge, when the client supplied one.
    pub code_challenge: Option<String>,

    /// PKCE challenge method ("plain" or "S256").
    pub code_challenge_method: Option<String>,
}

impl AuthorizationCode {
    /// Get the granting user as a typed `UserId`.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        UserId::from_i64(self.user_id)
    }

    /// Check if the code has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.expires
    }

    /// Parse the stored challenge method, if any.
    #[must_use]
    pub fn challenge_method(&self) -> Option<CodeChallengeMethod> {
        self.code_challenge_method
            .as_deref()
            .and_then(CodeChallengeMethod::parse)
    }

    /// Look up a code by its value.
    pub async fn find_by_code<'e, E>(executor: E, code: &str) -> Result<Option<Self>, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as(
            r"
            SELECT * FROM oauth_authorization_code WHERE authorization_code = $1
            ",
        )
        .bind(code)
        .fetch_optional(executor)
        .await
    }

    /// Insert or update a code row.
    ///
    /// All optional fields come from the record, so an absent `id_token`
    /// on an update clears any previously stored one.
    pub async fn upsert<'e, E>(
        executor: E,
        input: &NewAuthorizationCode,
    ) -> Result<(), sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query(
            r"
            INSERT INTO oauth_authorization_code
                (authorization_code, client_id, user_id, redirect_uri, expires,
                 scope, id_token, code_challenge, code_challenge_method)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (authorization_code) DO UPDATE
            SET client_id = EXCLUDED.client_id,
                user_id = EXCLUDED.user_id,
                redirect_uri = EXCLUDED.redirect_uri,
                expires = EXCLUDED.expires,
                scope = EXCLUDED.scope,
                id_token = EXCLUDED.id_token,
                code_challenge = EXCLUDED.code_challenge,
                code_challenge_method = EXCLUDED.code_challenge_method
            ",
        )
        .bind(&input.authorization_code)
        .bind(&input.client_id)
        .bind(input.user_id.as_i64())
        .bind(&input.redirect_uri)
        .bind(input.expires)
        .bind(&input.scope)
        .bind(&input.id_token)
        .bind(&input.code_challenge)
        .bind(input.code_challenge_method.map(CodeChallengeMethod::as_str))
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Delete a code after it has been exchanged.
    ///
    /// Returns whether a row was actually removed.
    pub async fn delete<'e, E>(executor: E, code: &str) -> Result<bool, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        let result = sqlx::query(
            r"
            DELETE FROM oauth_authorization_code WHERE authorization_code = $1
            ",
        )
        .bind(code)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Data for storing an authorization code.
///
/// One record type covers both the plain and the OIDC variant: the
/// `id_token` field is simply optional.
#[derive(Debug, Clone)]
pub struct NewAuthorizationCode {
    pub authorization_code: String,
    pub client_id: String,
    pub user_id: UserId,
    pub redirect_uri: String,
    pub expires: i64,
    pub scope: Option<String>,
    pub id_token: Option<String>,
    pub code_challenge: Option<String>,
    pub code_challenge_method: Option<CodeChallengeMethod>,
}
