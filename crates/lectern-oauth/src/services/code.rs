//! Authorization code storage.

use crate::error::OAuthError;
use lectern_db::models::{AuthorizationCode, NewAuthorizationCode};
use sqlx::PgPool;

/// Service for authorization code lifecycle operations.
#[derive(Debug, Clone)]
pub struct AuthorizationCodeService {
    pool: PgPool,
}

impl AuthorizationCodeService {
    /// Create a new authorization code service.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Look up a code by value.
    ///
    /// Expiry is not filtered here; the caller must check
    /// [`AuthorizationCode::is_expired`] and treat an expired code as
    /// invalid even though the row still exists.
    pub async fn get_authorization_code(
        &self,
        code: &str,
    ) -> Result<Option<AuthorizationCode>, OAuthError> {
        Ok(AuthorizationCode::find_by_code(&self.pool, code).await?)
    }

    /// Store an authorization code.
    ///
    /// The record's optional `id_token` covers the OIDC variant; there is
    /// no separate operation for it.
    pub async fn set_authorization_code(
        &self,
        input: &NewAuthorizationCode,
    ) -> Result<(), OAuthError> {
        AuthorizationCode::upsert(&self.pool, input).await?;
        tracing::debug!(
            client_id = %input.client_id,
            user_id = %input.user_id,
            with_id_token = input.id_token.is_some(),
            "Authorization code stored"
        );
        Ok(())
    }

    /// Consume a code: delete it so it can never be exchanged again.
    ///
    /// The runtime calls this immediately after a successful exchange.
    /// Returns whether a row was removed.
    pub async fn expire_authorization_code(&self, code: &str) -> Result<bool, OAuthError> {
        Ok(AuthorizationCode::delete(&self.pool, code).await?)
    }
}
