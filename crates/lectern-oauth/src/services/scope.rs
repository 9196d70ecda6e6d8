//! Scope registry lookups.

use crate::error::OAuthError;
use lectern_db::models::OAuthScope;
use sqlx::PgPool;

/// Service for scope existence and default-scope resolution.
#[derive(Debug, Clone)]
pub struct ScopeService {
    pool: PgPool,
}

impl ScopeService {
    /// Create a new scope service.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Check that every scope in a space-delimited list is registered.
    ///
    /// Membership is AND across all names: one unknown name fails the
    /// whole check. An empty list is refused rather than vacuously
    /// authorized.
    pub async fn scope_exists(&self, scope: &str) -> Result<bool, OAuthError> {
        let names: Vec<&str> = scope.split_whitespace().collect();
        if names.is_empty() {
            return Ok(false);
        }
        Ok(OAuthScope::exists_all(&self.pool, &names).await?)
    }

    /// Space-joined names of all scopes flagged as default.
    pub async fn get_default_scope(&self) -> Result<Option<String>, OAuthError> {
        let names = OAuthScope::find_default_names(&self.pool).await?;
        if names.is_empty() {
            Ok(None)
        } else {
            Ok(Some(names.join(" ")))
        }
    }
}
