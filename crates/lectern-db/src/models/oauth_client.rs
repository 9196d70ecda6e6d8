//! `OAuth2` client registration model.

use sqlx::FromRow;

/// A registered `OAuth2` client.
///
/// A client without a secret is a public client and must not be trusted to
/// keep credentials; confidential clients carry a secret that is compared
/// on every token request.
#[derive(Debug, Clone, FromRow)]
pub struct OAuthClient {
    /// Public client identifier. Immutable after registration.
    pub client_id: String,

    /// Client secret; `None` or empty marks a public client.
    pub client_secret: Option<String>,

    /// Redirect URI registered for the authorization-code flow.
    pub redirect_uri: String,

    /// Scopes the client may request (space-separated).
    pub scope: Option<String>,

    /// Whether the client must present a PKCE code challenge.
    pub require_pkce: bool,
}

impl OAuthClient {
    /// Whether this is a public client (no usable secret).
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.client_secret.as_deref().is_none_or(str::is_empty)
    }

    /// Get the registered scopes as a vector.
    #[must_use]
    pub fn scopes(&self) -> Vec<&str> {
        self.scope
            .as_deref()
            .map(|s| s.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Find a client by its public identifier.
    pub async fn find_by_client_id<'e, E>(
        executor: E,
        client_id: &str,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as(
            r"
            SELECT * FROM oauth_client WHERE client_id = $1
            ",
        )
        .bind(client_id)
        .fetch_optional(executor)
        .await
    }

    /// Create or update a client registration.
    ///
    /// The conflict target is the client id, so the id itself can never be
    /// rewritten; all other fields are replaced.
    pub async fn upsert<'e, E>(executor: E, input: &NewOAuthClient) -> Result<(), sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query(
            r"
            INSERT INTO oauth_client (client_id, client_secret, redirect_uri, scope, require_pkce)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (client_id) DO UPDATE
            SET client_secret = EXCLUDED.client_secret,
                redirect_uri = EXCLUDED.redirect_uri,
                scope = EXCLUDED.scope,
                require_pkce = EXCLUDED.require_pkce
            ",
        )
        .bind(&input.client_id)
        .bind(&input.client_secret)
        .bind(&input.redirect_uri)
        .bind(&input.scope)
        .bind(input.require_pkce)
        .execute(executor)
        .await?;

        Ok(())
    }
}

/// Data for registering or updating a client.
#[derive(Debug, Clone)]
pub struct NewOAuthClient {
    pub client_id: String,
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    pub scope: Option<String>,
    pub require_pkce: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(secret: Option<&str>) -> OAuthClient {
        OAuthClient {
            client_id: "portal".to_string(),
            client_secret: secret.map(String::from),
            redirect_uri: "https://portal.example.edu/callback".to_string(),
            scope: Some("openid profile".to_string()),
            require_pkce: false,
        }
    }

    #[test]
    fn test_public_without_secret() {
        assert!(client(None).is_public());
        assert!(client(Some("")).is_public());
    }

    #[test]
    fn test_confidential_with_secret() {
        assert!(!client(Some("s3cret")).is_public());
    }

    #[test]
    fn test_scopes_parsing() {
        assert_eq!(client(None).scopes(), vec!["openid", "profile"]);

        let mut bare = client(None);
        bare.scope = None;
        assert!(bare.scopes().is_empty());
    }
}
