//! Access and refresh token storage.

use crate::error::OAuthError;
use lectern_db::models::{
    AccessToken, NewAccessToken, NewRefreshToken, RefreshToken, UpsertOutcome,
};
use lectern_events::{AccessTokenCreated, AccessTokenUpdated, EventEnvelope, EventSink};
use sqlx::PgPool;
use std::sync::Arc;

/// Service for token lifecycle operations.
#[derive(Clone)]
pub struct TokenService {
    pool: PgPool,
    events: Arc<dyn EventSink>,
}

impl TokenService {
    /// Create a new token service.
    #[must_use]
    pub fn new(pool: PgPool, events: Arc<dyn EventSink>) -> Self {
        Self { pool, events }
    }

    /// Look up an access token by value.
    ///
    /// Expiry is not filtered here; the caller must check
    /// [`AccessToken::is_expired`].
    pub async fn get_access_token(&self, token: &str) -> Result<Option<AccessToken>, OAuthError> {
        Ok(AccessToken::find_by_token(&self.pool, token).await?)
    }

    /// Store an access token, updating an existing row in place.
    ///
    /// Publishes `AccessTokenCreated` or `AccessTokenUpdated` depending on
    /// which path the atomic upsert took. Publication is fire-and-forget.
    pub async fn set_access_token(&self, input: &NewAccessToken) -> Result<(), OAuthError> {
        let outcome = AccessToken::upsert(&self.pool, input).await?;

        tracing::debug!(
            client_id = %input.client_id,
            user_id = %input.user_id,
            created = outcome.is_created(),
            "Access token stored"
        );

        let envelope = match outcome {
            UpsertOutcome::Created => EventEnvelope::new(&AccessTokenCreated {
                user_id: input.user_id,
                client_id: input.client_id.clone(),
                scope: input.scope.clone(),
                access_token: input.access_token.clone(),
                expires: input.expires,
            })?,
            UpsertOutcome::Updated => EventEnvelope::new(&AccessTokenUpdated {
                user_id: input.user_id,
                client_id: input.client_id.clone(),
                scope: input.scope.clone(),
                access_token: input.access_token.clone(),
                expires: input.expires,
            })?,
        };
        self.events.publish(envelope).await;

        Ok(())
    }

    /// Look up a refresh token by value.
    pub async fn get_refresh_token(&self, token: &str) -> Result<Option<RefreshToken>, OAuthError> {
        Ok(RefreshToken::find_by_token(&self.pool, token).await?)
    }

    /// Store a refresh token. Insert-only: token values never recur.
    pub async fn set_refresh_token(&self, input: &NewRefreshToken) -> Result<(), OAuthError> {
        RefreshToken::insert(&self.pool, input).await?;
        tracing::debug!(
            client_id = %input.client_id,
            user_id = %input.user_id,
            "Refresh token stored"
        );
        Ok(())
    }

    /// Invalidate a refresh token after rotation.
    ///
    /// Returns whether a row was removed. A store error here is fatal to
    /// the caller: the old token would remain usable, so the runtime must
    /// abort the rotation rather than continue.
    pub async fn unset_refresh_token(&self, token: &str) -> Result<bool, OAuthError> {
        let removed = RefreshToken::delete(&self.pool, token).await?;
        if !removed {
            tracing::warn!("Refresh token invalidation matched no row");
        }
        Ok(removed)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService").finish_non_exhaustive()
    }
}
