//! Persisted entity models.
//!
//! One module per table. Query methods are generic over the `SQLx`
//! executor so they work with pools, single connections, and transactions.

pub mod access_token;
pub mod authorization_code;
pub mod oauth_client;
pub mod refresh_token;
pub mod scope;
pub mod signing_key;

pub use access_token::{AccessToken, NewAccessToken};
pub use authorization_code::{AuthorizationCode, CodeChallengeMethod, NewAuthorizationCode};
pub use oauth_client::{NewOAuthClient, OAuthClient};
pub use refresh_token::{NewRefreshToken, RefreshToken};
pub use scope::OAuthScope;
pub use signing_key::{
    CreateSigningKey, SigningKey, DEFAULT_ENCRYPTION_ALGORITHM, DEFAULT_KEY_CLIENT_ID,
};

/// Outcome of an atomic upsert: whether the row was freshly inserted or an
/// existing row was updated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new row was inserted.
    Created,
    /// An existing row was updated.
    Updated,
}

impl UpsertOutcome {
    /// Whether the upsert took the insert path.
    #[must_use]
    pub fn is_created(self) -> bool {
        matches!(self, UpsertOutcome::Created)
    }
}
