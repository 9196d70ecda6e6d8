//! Storage contract tests.
//!
//! Database-dependent tests are marked with `#[ignore]` — run with
//! `TEST_DATABASE_URL` set and `cargo test -- --ignored`.

mod common;

use common::{setup_pool, MemoryIdentityProvider, TEST_PUBLIC_KEY};
use lectern_core::UserId;
use lectern_db::models::{
    CreateSigningKey, NewAccessToken, NewAuthorizationCode, NewOAuthClient, NewRefreshToken,
    SigningKey,
};
use lectern_events::{AccessTokenCreated, AccessTokenUpdated, Event, MemorySink};
use lectern_oauth::services::{
    AuthorizationCodeService, ClientScope, ClientService, KeyService, ScopeService, TokenService,
};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}

fn far_future() -> i64 {
    chrono::Utc::now().timestamp() + 3600
}

#[tokio::test]
async fn jti_operations_fail_loudly() {
    // No query is ever issued, so a lazy pool is enough.
    let pool = PgPool::connect_lazy("postgres://localhost/unused").unwrap();
    let keys = KeyService::new(pool);

    let err = keys
        .get_jti("portal", "subject", "audience", far_future(), "jti-1")
        .await
        .unwrap_err();
    assert!(err.is_not_implemented());

    let err = keys
        .set_jti("portal", "subject", "audience", far_future(), "jti-1")
        .await
        .unwrap_err();
    assert!(err.is_not_implemented());
}

#[tokio::test]
#[ignore] // Requires TEST_DATABASE_URL.
async fn client_credentials_matrix() {
    let pool = setup_pool().await;
    let clients = ClientService::new(pool);

    let confidential = unique("client");
    clients
        .set_client_details(&NewOAuthClient {
            client_id: confidential.clone(),
            client_secret: Some("s3cret".to_string()),
            redirect_uri: "https://app.example.edu/cb".to_string(),
            scope: None,
            require_pkce: false,
        })
        .await
        .unwrap();

    let public = unique("client");
    clients
        .set_client_details(&NewOAuthClient {
            client_id: public.clone(),
            client_secret: None,
            redirect_uri: "https://spa.example.edu/cb".to_string(),
            scope: None,
            require_pkce: true,
        })
        .await
        .unwrap();

    assert!(clients
        .check_client_credentials(&confidential, Some("s3cret"))
        .await
        .unwrap());
    assert!(!clients
        .check_client_credentials(&confidential, Some("wrong"))
        .await
        .unwrap());
    assert!(!clients
        .check_client_credentials(&confidential, None)
        .await
        .unwrap());

    // Public client: both sides empty.
    assert!(clients
        .check_client_credentials(&public, None)
        .await
        .unwrap());
    assert!(!clients
        .check_client_credentials(&public, Some("anything"))
        .await
        .unwrap());

    assert!(clients.is_public_client(&public).await.unwrap());
    assert!(!clients.is_public_client(&confidential).await.unwrap());
    assert!(!clients.is_public_client("no-such-client").await.unwrap());

    // No per-client grant restrictions are enforced.
    assert!(clients.check_restricted_grant_type(&confidential, "password"));
}

#[tokio::test]
#[ignore] // Requires TEST_DATABASE_URL.
async fn client_upsert_and_scope_lookup() {
    let pool = setup_pool().await;
    let clients = ClientService::new(pool);

    let client_id = unique("client");
    assert_eq!(
        clients.get_client_scope(&client_id).await.unwrap(),
        ClientScope::UnknownClient
    );

    clients
        .set_client_details(&NewOAuthClient {
            client_id: client_id.clone(),
            client_secret: Some("one".to_string()),
            redirect_uri: "https://app.example.edu/cb".to_string(),
            scope: None,
            require_pkce: false,
        })
        .await
        .unwrap();
    assert_eq!(
        clients.get_client_scope(&client_id).await.unwrap(),
        ClientScope::Unset
    );

    // Second put updates the row in place.
    clients
        .set_client_details(&NewOAuthClient {
            client_id: client_id.clone(),
            client_secret: Some("two".to_string()),
            redirect_uri: "https://app.example.edu/cb2".to_string(),
            scope: Some("openid profile".to_string()),
            require_pkce: true,
        })
        .await
        .unwrap();

    let details = clients.get_client_details(&client_id).await.unwrap().unwrap();
    assert_eq!(details.client_secret.as_deref(), Some("two"));
    assert_eq!(details.redirect_uri, "https://app.example.edu/cb2");
    assert!(details.require_pkce);
    assert_eq!(
        clients.get_client_scope(&client_id).await.unwrap(),
        ClientScope::Scope("openid profile".to_string())
    );
}

#[tokio::test]
#[ignore] // Requires TEST_DATABASE_URL.
async fn access_token_upsert_emits_created_then_updated() {
    let pool = setup_pool().await;
    let sink = Arc::new(MemorySink::new());
    let tokens = TokenService::new(pool, sink.clone());

    let token = unique("tok");
    let input = NewAccessToken {
        access_token: token.clone(),
        client_id: "portal".to_string(),
        user_id: UserId::from_i64(5),
        expires: far_future(),
        scope: Some("openid".to_string()),
    };

    tokens.set_access_token(&input).await.unwrap();
    tokens
        .set_access_token(&NewAccessToken {
            scope: Some("openid profile".to_string()),
            ..input.clone()
        })
        .await
        .unwrap();

    let stored = tokens.get_access_token(&token).await.unwrap().unwrap();
    assert_eq!(stored.scope.as_deref(), Some("openid profile"));
    assert_eq!(stored.user_id(), UserId::from_i64(5));

    let published = sink.published();
    assert_eq!(published.len(), 2);
    assert_eq!(published[0].event_type, AccessTokenCreated::EVENT_TYPE);
    assert_eq!(published[1].event_type, AccessTokenUpdated::EVENT_TYPE);
    assert_eq!(published[1].payload["access_token"], token.as_str());
    assert_eq!(published[1].payload["scope"], "openid profile");
}

#[tokio::test]
#[ignore] // Requires TEST_DATABASE_URL.
async fn refresh_token_rotation_removes_row() {
    let pool = setup_pool().await;
    let tokens = TokenService::new(pool, Arc::new(MemorySink::new()));

    let token = unique("rt");
    tokens
        .set_refresh_token(&NewRefreshToken {
            refresh_token: token.clone(),
            client_id: "portal".to_string(),
            user_id: UserId::from_i64(5),
            expires: far_future(),
            scope: None,
        })
        .await
        .unwrap();

    assert!(tokens.get_refresh_token(&token).await.unwrap().is_some());

    assert!(tokens.unset_refresh_token(&token).await.unwrap());
    assert!(tokens.get_refresh_token(&token).await.unwrap().is_none());
    // A second invalidation matches nothing.
    assert!(!tokens.unset_refresh_token(&token).await.unwrap());
}

#[tokio::test]
#[ignore] // Requires TEST_DATABASE_URL.
async fn refresh_token_values_never_recur() {
    let pool = setup_pool().await;
    let tokens = TokenService::new(pool, Arc::new(MemorySink::new()));

    let token = unique("rt");
    let input = NewRefreshToken {
        refresh_token: token,
        client_id: "portal".to_string(),
        user_id: UserId::from_i64(5),
        expires: far_future(),
        scope: None,
    };

    tokens.set_refresh_token(&input).await.unwrap();
    // Insert-only: a duplicate value is a store-level conflict.
    let err = tokens.set_refresh_token(&input).await.unwrap_err();
    assert!(err.is_database_error());
}

#[tokio::test]
#[ignore] // Requires TEST_DATABASE_URL.
async fn authorization_code_round_trip() {
    let pool = setup_pool().await;
    let codes = AuthorizationCodeService::new(pool);

    let plain_code = unique("code");
    codes
        .set_authorization_code(&NewAuthorizationCode {
            authorization_code: plain_code.clone(),
            client_id: "portal".to_string(),
            user_id: UserId::from_i64(5),
            redirect_uri: "https://app.example.edu/cb".to_string(),
            expires: far_future(),
            scope: Some("openid".to_string()),
            id_token: None,
            code_challenge: None,
            code_challenge_method: None,
        })
        .await
        .unwrap();

    let stored = codes
        .get_authorization_code(&plain_code)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.client_id, "portal");
    assert_eq!(stored.user_id(), UserId::from_i64(5));
    assert_eq!(stored.scope.as_deref(), Some("openid"));
    assert!(stored.id_token.is_none());
    assert!(!stored.is_expired());

    let oidc_code = unique("code");
    codes
        .set_authorization_code(&NewAuthorizationCode {
            authorization_code: oidc_code.clone(),
            client_id: "portal".to_string(),
            user_id: UserId::from_i64(5),
            redirect_uri: "https://app.example.edu/cb".to_string(),
            expires: far_future(),
            scope: Some("openid".to_string()),
            id_token: Some("header.payload.signature".to_string()),
            code_challenge: Some("challenge".to_string()),
            code_challenge_method: Some(
                lectern_db::models::CodeChallengeMethod::S256,
            ),
        })
        .await
        .unwrap();

    let stored = codes
        .get_authorization_code(&oidc_code)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.id_token.as_deref(), Some("header.payload.signature"));
    assert_eq!(
        stored.challenge_method(),
        Some(lectern_db::models::CodeChallengeMethod::S256)
    );

    // One-time use: once expired, the code is gone.
    assert!(codes.expire_authorization_code(&oidc_code).await.unwrap());
    assert!(codes
        .get_authorization_code(&oidc_code)
        .await
        .unwrap()
        .is_none());
    assert!(!codes.expire_authorization_code(&oidc_code).await.unwrap());
}

#[tokio::test]
#[ignore] // Requires TEST_DATABASE_URL.
async fn scope_existence_and_defaults() {
    let pool = setup_pool().await;
    let scopes = ScopeService::new(pool);

    assert!(scopes.scope_exists("openid profile").await.unwrap());
    assert!(scopes.scope_exists("openid").await.unwrap());
    assert!(!scopes.scope_exists("openid bogus").await.unwrap());
    assert!(!scopes.scope_exists("").await.unwrap());
    assert!(!scopes.scope_exists("   ").await.unwrap());

    // Only the openid seed scope is flagged default.
    assert_eq!(
        scopes.get_default_scope().await.unwrap().as_deref(),
        Some("openid")
    );
}

#[tokio::test]
#[ignore] // Requires TEST_DATABASE_URL.
async fn signing_key_fallback_precedence() {
    let pool = setup_pool().await;
    let keys = KeyService::new(pool.clone());

    let client_id = unique("client");

    // Only the default row exists for this client: fall back.
    assert_eq!(
        keys.get_public_key(Some(&client_id)).await.unwrap().as_deref(),
        Some(TEST_PUBLIC_KEY)
    );
    assert_eq!(
        keys.get_encryption_algorithm(Some(&client_id)).await.unwrap(),
        "RS256"
    );

    // A client-specific key takes precedence once present.
    SigningKey::insert_if_missing(
        &pool,
        &CreateSigningKey {
            client_id: client_id.clone(),
            public_key: "client-public".to_string(),
            private_key: "client-private".to_string(),
            encryption_algorithm: Some("RS384".to_string()),
        },
    )
    .await
    .unwrap();

    assert_eq!(
        keys.get_public_key(Some(&client_id)).await.unwrap().as_deref(),
        Some("client-public")
    );
    assert_eq!(
        keys.get_private_key(Some(&client_id)).await.unwrap().as_deref(),
        Some("client-private")
    );
    assert_eq!(
        keys.get_encryption_algorithm(Some(&client_id)).await.unwrap(),
        "RS384"
    );

    // No client id asks for the default key directly.
    assert_eq!(
        keys.get_public_key(None).await.unwrap().as_deref(),
        Some(TEST_PUBLIC_KEY)
    );

    // JWT-bearer lookup has no fallback.
    assert_eq!(
        keys.get_client_key(&client_id, "subject").await.unwrap().as_deref(),
        Some("client-public")
    );
    assert!(keys
        .get_client_key(&unique("client"), "subject")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
#[ignore] // Requires TEST_DATABASE_URL.
async fn userinfo_service_composes_with_store() {
    // The claims path never touches the store, but the façade wires it
    // together with the pool-backed services; exercise that assembly.
    let pool = setup_pool().await;
    let provider = Arc::new(MemoryIdentityProvider::new());
    provider.add_user(
        lectern_oauth::IdentityUser::new(UserId::from_i64(7), "smurphy", "Sam", "Murphy", "sam@x.com"),
        "pw",
    );

    let storage = lectern_oauth::OAuthStorage::new(
        pool,
        provider,
        Arc::new(MemorySink::new()),
        lectern_oauth::OAuthConfig::new("https://lms.example.edu"),
    );

    let claims = storage
        .userinfo()
        .get_user_claims(UserId::from_i64(7), "email")
        .await
        .unwrap();
    assert_eq!(claims["email"], "sam@x.com");

    assert!(storage.users().check_user_credentials("smurphy", "pw").await.unwrap());
    assert!(!storage.scopes().scope_exists("bogus").await.unwrap());
}
