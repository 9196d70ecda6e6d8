//! Identity provider seam.
//!
//! The engine never owns user accounts or password hashes; it reaches the
//! host platform's identity store through this trait. The host injects an
//! implementation at construction, and tests use an in-memory one.

use crate::error::OAuthError;
use async_trait::async_trait;
use lectern_core::UserId;
use serde_json::Value;

/// A user record as the identity store exposes it to this engine.
///
/// Field names follow the host platform's profile schema; the claims
/// mapper projects them onto the standard OIDC claim keys.
#[derive(Debug, Clone)]
pub struct IdentityUser {
    /// Numeric account id.
    pub id: UserId,

    /// Login name.
    pub username: String,

    /// First (given) name.
    pub first_name: String,

    /// Last (family) name.
    pub last_name: String,

    /// Middle name, if recorded.
    pub middle_name: Option<String>,

    /// Alternate/display name, if recorded.
    pub alternate_name: Option<String>,

    /// Email address.
    pub email: String,

    /// Bounce counter for the email address; zero means the address is
    /// considered verified.
    pub email_bounce_count: i64,

    /// IANA timezone name.
    pub timezone: Option<String>,

    /// Preferred language code.
    pub language: Option<String>,

    /// Personal website URL.
    pub website: Option<String>,

    /// Primary phone number.
    pub phone: Option<String>,

    /// Mobile phone number.
    pub mobile_phone: Option<String>,

    /// Street address.
    pub address: Option<String>,

    /// City.
    pub city: Option<String>,

    /// Country code.
    pub country: Option<String>,

    /// Unix timestamp of the last profile modification.
    pub updated_at: Option<i64>,
}

impl IdentityUser {
    /// Create a record with the required fields; everything else starts
    /// empty.
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            middle_name: None,
            alternate_name: None,
            email: email.into(),
            email_bounce_count: 0,
            timezone: None,
            language: None,
            website: None,
            phone: None,
            mobile_phone: None,
            address: None,
            city: None,
            country: None,
            updated_at: None,
        }
    }

    /// Formatted full name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Whether the email address is considered verified (no bounces).
    #[must_use]
    pub fn email_verified(&self) -> bool {
        self.email_bounce_count == 0
    }

    /// First non-empty of the two phone fields.
    #[must_use]
    pub fn phone_number(&self) -> Option<&str> {
        self.phone
            .as_deref()
            .filter(|p| !p.is_empty())
            .or_else(|| self.mobile_phone.as_deref().filter(|p| !p.is_empty()))
    }

    /// Direct field lookup by name, for claim keys outside the fixed
    /// mapping table. Unknown names yield null.
    #[must_use]
    pub fn field(&self, name: &str) -> Value {
        fn opt(value: &Option<String>) -> Value {
            value.clone().map_or(Value::Null, Value::String)
        }

        match name {
            "id" => Value::from(self.id.as_i64()),
            "username" => Value::String(self.username.clone()),
            "first_name" => Value::String(self.first_name.clone()),
            "last_name" => Value::String(self.last_name.clone()),
            "middle_name" => opt(&self.middle_name),
            "alternate_name" => opt(&self.alternate_name),
            "email" => Value::String(self.email.clone()),
            "email_bounce_count" => Value::from(self.email_bounce_count),
            "timezone" => opt(&self.timezone),
            "language" => opt(&self.language),
            "website" => opt(&self.website),
            "phone" => opt(&self.phone),
            "mobile_phone" => opt(&self.mobile_phone),
            "address" => opt(&self.address),
            "city" => opt(&self.city),
            "country" => opt(&self.country),
            "updated_at" => self.updated_at.map_or(Value::Null, Value::from),
            _ => Value::Null,
        }
    }
}

/// Profile fields the engine may ask the identity store to change.
///
/// `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    /// New password, verified and hashed by the identity store.
    pub password: Option<String>,
    /// New first name.
    pub first_name: Option<String>,
    /// New last name.
    pub last_name: Option<String>,
}

/// Capability the host's identity store provides to this engine.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Look up a user by login name.
    async fn find_by_username(&self, username: &str)
        -> Result<Option<IdentityUser>, OAuthError>;

    /// Look up a user by numeric id.
    async fn find_by_id(&self, id: UserId) -> Result<Option<IdentityUser>, OAuthError>;

    /// Verify a password for an already-looked-up user.
    async fn verify_password(
        &self,
        user: &IdentityUser,
        password: &str,
    ) -> Result<bool, OAuthError>;

    /// Create a new account with the given credentials.
    async fn create_account(
        &self,
        username: &str,
        password: &str,
    ) -> Result<IdentityUser, OAuthError>;

    /// Apply profile changes to an existing account.
    async fn update_profile(
        &self,
        username: &str,
        update: ProfileUpdate,
    ) -> Result<(), OAuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> IdentityUser {
        IdentityUser::new(UserId::from_i64(5), "jdoe", "Jane", "Doe", "jdoe@x.com")
    }

    #[test]
    fn test_full_name() {
        assert_eq!(jane().full_name(), "Jane Doe");

        let mut solo = jane();
        solo.last_name.clear();
        assert_eq!(solo.full_name(), "Jane");
    }

    #[test]
    fn test_email_verified_tracks_bounces() {
        let mut user = jane();
        assert!(user.email_verified());
        user.email_bounce_count = 3;
        assert!(!user.email_verified());
    }

    #[test]
    fn test_phone_number_prefers_primary() {
        let mut user = jane();
        assert_eq!(user.phone_number(), None);

        user.mobile_phone = Some("+353 86 000 0000".to_string());
        assert_eq!(user.phone_number(), Some("+353 86 000 0000"));

        user.phone = Some("+353 1 000 0000".to_string());
        assert_eq!(user.phone_number(), Some("+353 1 000 0000"));

        user.phone = Some(String::new());
        assert_eq!(user.phone_number(), Some("+353 86 000 0000"));
    }

    #[test]
    fn test_field_lookup() {
        let user = jane();
        assert_eq!(user.field("username"), Value::String("jdoe".to_string()));
        assert_eq!(user.field("id"), Value::from(5));
        assert_eq!(user.field("no_such_field"), Value::Null);
    }
}
