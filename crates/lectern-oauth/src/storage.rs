//! Storage façade composing the per-concern services.

use crate::config::OAuthConfig;
use crate::identity::IdentityProvider;
use crate::services::{
    AuthorizationCodeService, ClientService, KeyService, ScopeService, TokenService, UserService,
    UserInfoService,
};
use lectern_events::EventSink;
use sqlx::PgPool;
use std::sync::Arc;

/// The storage-and-claims engine an authorization-server runtime builds
/// on.
///
/// One façade, grouped by cohesion: clients, tokens, codes, scopes, keys,
/// users, and userinfo each expose their own slice of the contract. All
/// dependencies — the connection pool, the identity provider, the event
/// sink — are injected here and never looked up from ambient state.
#[derive(Debug, Clone)]
pub struct OAuthStorage {
    clients: ClientService,
    tokens: TokenService,
    codes: AuthorizationCodeService,
    scopes: ScopeService,
    keys: KeyService,
    users: UserService,
    userinfo: UserInfoService,
}

impl OAuthStorage {
    /// Assemble the engine from its injected dependencies.
    #[must_use]
    pub fn new(
        pool: PgPool,
        identity: Arc<dyn IdentityProvider>,
        events: Arc<dyn EventSink>,
        config: OAuthConfig,
    ) -> Self {
        Self {
            clients: ClientService::new(pool.clone()),
            tokens: TokenService::new(pool.clone(), events),
            codes: AuthorizationCodeService::new(pool.clone()),
            scopes: ScopeService::new(pool.clone()),
            keys: KeyService::new(pool),
            users: UserService::new(identity.clone()),
            userinfo: UserInfoService::new(identity, &config),
        }
    }

    /// Client registrations and credential checks.
    #[must_use]
    pub fn clients(&self) -> &ClientService {
        &self.clients
    }

    /// Access and refresh token lifecycle.
    #[must_use]
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Authorization code lifecycle.
    #[must_use]
    pub fn codes(&self) -> &AuthorizationCodeService {
        &self.codes
    }

    /// Scope existence and defaults.
    #[must_use]
    pub fn scopes(&self) -> &ScopeService {
        &self.scopes
    }

    /// Signing keys, algorithms, and JWT-bearer lookups.
    #[must_use]
    pub fn keys(&self) -> &KeyService {
        &self.keys
    }

    /// User credential checks and account upsert.
    #[must_use]
    pub fn users(&self) -> &UserService {
        &self.users
    }

    /// OIDC UserInfo claims.
    #[must_use]
    pub fn userinfo(&self) -> &UserInfoService {
        &self.userinfo
    }
}
