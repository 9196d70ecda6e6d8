//! Install-time bootstrap.
//!
//! Seeds the data a fresh install requires: the standard OpenID Connect
//! scope set and the default signing-key row. Both operations are
//! idempotent (`INSERT .. ON CONFLICT DO NOTHING`), so running the
//! bootstrap on every startup is safe.
//!
//! Key *generation* is owned by the host's key-management tooling; the
//! bootstrap only persists material it is given.

use crate::error::DbError;
use crate::models::{
    CreateSigningKey, OAuthScope, SigningKey, DEFAULT_ENCRYPTION_ALGORITHM, DEFAULT_KEY_CLIENT_ID,
};
use sqlx::PgPool;
use tracing::{info, instrument, warn};

/// Scopes seeded on install. `openid` is the only default scope.
pub const DEFAULT_SCOPES: [(&str, bool); 5] = [
    ("openid", true),
    ("profile", false),
    ("email", false),
    ("address", false),
    ("phone", false),
];

/// PEM key material for the default signing key row.
#[derive(Debug, Clone)]
pub struct DefaultSigningKey {
    /// PEM-encoded public key.
    pub public_key: String,
    /// PEM-encoded private key.
    pub private_key: String,
}

/// What the install bootstrap actually changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// Number of scope rows inserted by this run.
    pub scopes_seeded: usize,
    /// Whether the default signing key row was inserted by this run.
    pub key_installed: bool,
}

/// Seed default scopes and the default signing key.
///
/// Passing `None` for the key leaves an existing default row untouched
/// and only warns when no default key exists at all; ID token signing is
/// unavailable until one is installed.
///
/// # Errors
///
/// Returns [`DbError::QueryFailed`] if any seed statement fails.
#[instrument(skip(pool, default_key))]
pub async fn run_install(
    pool: &PgPool,
    default_key: Option<&DefaultSigningKey>,
) -> Result<InstallReport, DbError> {
    let mut scopes_seeded = 0;

    for (scope, is_default) in DEFAULT_SCOPES {
        let inserted = OAuthScope::insert_if_missing(pool, scope, is_default)
            .await
            .map_err(DbError::QueryFailed)?;
        if inserted {
            info!(scope, is_default, "install.scope.seeded");
            scopes_seeded += 1;
        }
    }

    let key_installed = match default_key {
        Some(key) => {
            let input = CreateSigningKey {
                client_id: DEFAULT_KEY_CLIENT_ID.to_string(),
                public_key: key.public_key.clone(),
                private_key: key.private_key.clone(),
                encryption_algorithm: Some(DEFAULT_ENCRYPTION_ALGORITHM.to_string()),
            };
            let inserted = SigningKey::insert_if_missing(pool, &input)
                .await
                .map_err(DbError::QueryFailed)?;
            if inserted {
                info!("install.signing_key.created");
            } else {
                info!("install.signing_key.exists");
            }
            inserted
        }
        None => {
            let existing = SigningKey::find_default(pool)
                .await
                .map_err(DbError::QueryFailed)?;
            if existing.is_none() {
                warn!("No default signing key installed; ID token signing is unavailable");
            }
            false
        }
    };

    info!(scopes_seeded, key_installed, "Install bootstrap complete");

    Ok(InstallReport {
        scopes_seeded,
        key_installed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_set_matches_install_contract() {
        let defaults: Vec<&str> = DEFAULT_SCOPES
            .iter()
            .filter(|(_, is_default)| *is_default)
            .map(|(scope, _)| *scope)
            .collect();
        assert_eq!(defaults, vec!["openid"]);
        assert_eq!(DEFAULT_SCOPES.len(), 5);
    }
}
