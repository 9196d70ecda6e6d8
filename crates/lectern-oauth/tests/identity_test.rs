//! User credential and claims tests against the in-memory identity
//! provider. No database required.

mod common;

use common::MemoryIdentityProvider;
use lectern_core::UserId;
use lectern_oauth::services::{UserInfoService, UserService};
use lectern_oauth::{IdentityUser, OAuthConfig};
use serde_json::Value;
use std::sync::Arc;

const BASE_URL: &str = "https://lms.example.edu";

fn provider_with_jane() -> Arc<MemoryIdentityProvider> {
    let provider = MemoryIdentityProvider::new();
    provider.add_user(
        IdentityUser::new(UserId::from_i64(5), "jdoe", "Jane", "Doe", "jdoe@x.com"),
        "correct horse",
    );
    Arc::new(provider)
}

#[tokio::test]
async fn check_user_credentials_delegates_to_provider() {
    let users = UserService::new(provider_with_jane());

    assert!(users
        .check_user_credentials("jdoe", "correct horse")
        .await
        .unwrap());
    assert!(!users
        .check_user_credentials("jdoe", "wrong")
        .await
        .unwrap());
}

#[tokio::test]
async fn unknown_user_fails_credential_check() {
    let users = UserService::new(provider_with_jane());

    assert!(!users
        .check_user_credentials("nobody", "anything")
        .await
        .unwrap());
}

#[tokio::test]
async fn get_user_details_by_username() {
    let users = UserService::new(provider_with_jane());

    let details = users.get_user_details("jdoe").await.unwrap().unwrap();
    assert_eq!(details.id, UserId::from_i64(5));
    assert_eq!(details.email, "jdoe@x.com");

    assert!(users.get_user_details("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn set_user_creates_account_with_names() {
    let provider = Arc::new(MemoryIdentityProvider::new());
    let users = UserService::new(provider.clone());

    users
        .set_user("new.student", "pass", "Sam", "Murphy")
        .await
        .unwrap();

    let created = provider.user("new.student").unwrap();
    assert_eq!(created.first_name, "Sam");
    assert_eq!(created.last_name, "Murphy");
    assert!(users
        .check_user_credentials("new.student", "pass")
        .await
        .unwrap());
}

#[tokio::test]
async fn set_user_updates_existing_account() {
    let provider = provider_with_jane();
    let users = UserService::new(provider.clone());

    users.set_user("jdoe", "new pass", "Janet", "").await.unwrap();

    let updated = provider.user("jdoe").unwrap();
    assert_eq!(updated.first_name, "Janet");
    // Empty name fields are left untouched.
    assert_eq!(updated.last_name, "Doe");
    assert!(users
        .check_user_credentials("jdoe", "new pass")
        .await
        .unwrap());
}

#[tokio::test]
async fn user_claims_for_profile_and_email() {
    let userinfo = UserInfoService::new(provider_with_jane(), &OAuthConfig::new(BASE_URL));

    let claims = userinfo
        .get_user_claims(UserId::from_i64(5), "profile email")
        .await
        .unwrap();

    assert_eq!(claims["given_name"], "Jane");
    assert_eq!(claims["family_name"], "Doe");
    assert_eq!(claims["preferred_username"], "jdoe");
    assert_eq!(claims["email"], "jdoe@x.com");
    assert_eq!(claims["email_verified"], true);
    assert_eq!(claims["profile"], "https://lms.example.edu/user/5");
    assert_eq!(claims["picture"], "https://lms.example.edu/user/5/picture");

    // Groups that were not requested contribute nothing.
    assert!(!claims.contains_key("phone_number"));
    assert!(!claims.contains_key("phone_number_verified"));
    assert!(!claims.contains_key("address"));
    // Unsupported profile fields are null, not absent.
    assert_eq!(claims["gender"], Value::Null);
    assert_eq!(claims["birthdate"], Value::Null);
}

#[tokio::test]
async fn user_claims_for_unknown_user_are_empty() {
    let userinfo = UserInfoService::new(provider_with_jane(), &OAuthConfig::new(BASE_URL));

    let claims = userinfo
        .get_user_claims(UserId::from_i64(404), "profile email")
        .await
        .unwrap();
    assert!(claims.is_empty());
}
