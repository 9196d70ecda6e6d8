//! Signing key and JWT-bearer lookups.

use crate::error::OAuthError;
use lectern_db::models::{SigningKey, DEFAULT_ENCRYPTION_ALGORITHM};
use sqlx::PgPool;

/// Service for signing-key material and algorithm resolution.
///
/// Every lookup resolves the client-specific row first and falls back to
/// the default row (empty client id) when the specific row is absent or
/// the field is empty.
#[derive(Debug, Clone)]
pub struct KeyService {
    pool: PgPool,
}

impl KeyService {
    /// Create a new key service.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Public key for a client, falling back to the default key.
    pub async fn get_public_key(
        &self,
        client_id: Option<&str>,
    ) -> Result<Option<String>, OAuthError> {
        if let Some(row) = self.find_client_row(client_id).await? {
            if !row.public_key.is_empty() {
                return Ok(Some(row.public_key));
            }
        }
        Ok(SigningKey::find_default(&self.pool)
            .await?
            .map(|row| row.public_key))
    }

    /// Private key for a client, falling back to the default key.
    pub async fn get_private_key(
        &self,
        client_id: Option<&str>,
    ) -> Result<Option<String>, OAuthError> {
        if let Some(row) = self.find_client_row(client_id).await? {
            if !row.private_key.is_empty() {
                return Ok(Some(row.private_key));
            }
        }
        Ok(SigningKey::find_default(&self.pool)
            .await?
            .map(|row| row.private_key))
    }

    /// Signing algorithm for a client.
    ///
    /// Falls back from the client row to the default row, and to "RS256"
    /// when neither specifies one.
    pub async fn get_encryption_algorithm(
        &self,
        client_id: Option<&str>,
    ) -> Result<String, OAuthError> {
        if let Some(row) = self.find_client_row(client_id).await? {
            if let Some(alg) = row.algorithm() {
                return Ok(alg.to_string());
            }
        }

        let default = SigningKey::find_default(&self.pool).await?;
        Ok(default
            .and_then(|row| row.algorithm().map(String::from))
            .unwrap_or_else(|| DEFAULT_ENCRYPTION_ALGORITHM.to_string()))
    }

    /// Public key registered for a JWT-bearer client.
    ///
    /// No default-key fallback applies here: a bearer assertion must be
    /// verifiable against the client's own key. The `subject` is accepted
    /// for contract compatibility but does not narrow the lookup; keys are
    /// registered per client.
    pub async fn get_client_key(
        &self,
        client_id: &str,
        subject: &str,
    ) -> Result<Option<String>, OAuthError> {
        tracing::debug!(client_id, subject, "JWT-bearer key lookup");
        Ok(SigningKey::find_by_client_id(&self.pool, client_id)
            .await?
            .map(|row| row.public_key))
    }

    /// Replay-protection lookup for JWT-bearer assertions.
    ///
    /// # Errors
    ///
    /// Always fails with [`OAuthError::NotImplemented`]: this engine does
    /// not provide jti replay protection, and callers must not assume it
    /// does.
    pub async fn get_jti(
        &self,
        _client_id: &str,
        _subject: &str,
        _audience: &str,
        _expires: i64,
        _jti: &str,
    ) -> Result<(), OAuthError> {
        Err(OAuthError::NotImplemented("get_jti"))
    }

    /// Record a used jti for replay protection.
    ///
    /// # Errors
    ///
    /// Always fails with [`OAuthError::NotImplemented`]; see
    /// [`Self::get_jti`].
    pub async fn set_jti(
        &self,
        _client_id: &str,
        _subject: &str,
        _audience: &str,
        _expires: i64,
        _jti: &str,
    ) -> Result<(), OAuthError> {
        Err(OAuthError::NotImplemented("set_jti"))
    }

    async fn find_client_row(
        &self,
        client_id: Option<&str>,
    ) -> Result<Option<SigningKey>, OAuthError> {
        match client_id {
            Some(client_id) if !client_id.is_empty() => {
                Ok(SigningKey::find_by_client_id(&self.pool, client_id).await?)
            }
            _ => Ok(None),
        }
    }
}
