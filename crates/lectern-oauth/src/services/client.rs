//! Client registration and credential checks.

use crate::error::OAuthError;
use lectern_db::models::{NewOAuthClient, OAuthClient};
use sqlx::PgPool;
use subtle::ConstantTimeEq;

/// Result of a client scope lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientScope {
    /// No client is registered under the given id.
    UnknownClient,
    /// The client exists but has no scope restriction recorded.
    Unset,
    /// The client's registered scope string.
    Scope(String),
}

/// Service for client registrations and credential verification.
#[derive(Debug, Clone)]
pub struct ClientService {
    pool: PgPool,
}

impl ClientService {
    /// Create a new client service.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Verify the supplied client credentials.
    ///
    /// A client without a stored secret is a public client and
    /// authenticates only when the supplied secret is also empty.
    /// Otherwise the stored and supplied secrets must match exactly; the
    /// comparison runs in constant time.
    pub async fn check_client_credentials(
        &self,
        client_id: &str,
        client_secret: Option<&str>,
    ) -> Result<bool, OAuthError> {
        let stored = OAuthClient::find_by_client_id(&self.pool, client_id)
            .await?
            .and_then(|client| client.client_secret);

        let stored = stored.as_deref().unwrap_or("");
        let supplied = client_secret.unwrap_or("");

        if stored.is_empty() && supplied.is_empty() {
            return Ok(true);
        }

        Ok(secrets_match(stored, supplied))
    }

    /// Whether the client is public (registered without a secret).
    ///
    /// An unknown client is not public; it is nothing.
    pub async fn is_public_client(&self, client_id: &str) -> Result<bool, OAuthError> {
        let client = OAuthClient::find_by_client_id(&self.pool, client_id).await?;
        Ok(client.is_some_and(|c| c.is_public()))
    }

    /// Whether the client may use the given grant type.
    ///
    /// No per-client restriction is enforced; this is the extension point
    /// where such a policy would live.
    #[must_use]
    pub fn check_restricted_grant_type(&self, _client_id: &str, _grant_type: &str) -> bool {
        true
    }

    /// Fetch a client registration.
    pub async fn get_client_details(
        &self,
        client_id: &str,
    ) -> Result<Option<OAuthClient>, OAuthError> {
        Ok(OAuthClient::find_by_client_id(&self.pool, client_id).await?)
    }

    /// Create or update a client registration.
    pub async fn set_client_details(&self, input: &NewOAuthClient) -> Result<(), OAuthError> {
        OAuthClient::upsert(&self.pool, input).await?;
        tracing::debug!(client_id = %input.client_id, "Client registration stored");
        Ok(())
    }

    /// Fetch the scope restriction recorded for a client.
    pub async fn get_client_scope(&self, client_id: &str) -> Result<ClientScope, OAuthError> {
        match OAuthClient::find_by_client_id(&self.pool, client_id).await? {
            None => Ok(ClientScope::UnknownClient),
            Some(client) => match client.scope {
                None => Ok(ClientScope::Unset),
                Some(scope) => Ok(ClientScope::Scope(scope)),
            },
        }
    }
}

/// Constant-time string equality.
///
/// Length is not secret; contents are.
fn secrets_match(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secrets_match() {
        assert!(secrets_match("s3cret", "s3cret"));
        assert!(!secrets_match("s3cret", "S3cret"));
        assert!(!secrets_match("s3cret", "s3cret-longer"));
        assert!(secrets_match("", ""));
    }
}
