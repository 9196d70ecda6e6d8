//! OpenID Connect claim mapping.
//!
//! Pure projection of an [`IdentityUser`] onto the standard OIDC claim
//! groups. The requested-claims string is space-delimited; each of the
//! four fixed groups that appears is expanded into its claim keys, and
//! each key maps to a profile field through the table below.
//!
//! Unknown users and unknown claim keys degrade gracefully: the caller
//! gets an empty map or a null value, never an error.

use crate::identity::IdentityUser;
use serde_json::{Map, Value};

/// Claim keys in the `profile` group.
pub const PROFILE_CLAIMS: &[&str] = &[
    "name",
    "family_name",
    "given_name",
    "middle_name",
    "nickname",
    "preferred_username",
    "profile",
    "picture",
    "website",
    "gender",
    "birthdate",
    "zoneinfo",
    "locale",
    "updated_at",
];

/// Claim keys in the `email` group.
pub const EMAIL_CLAIMS: &[&str] = &["email", "email_verified"];

/// Claim keys nested under the `address` claim.
pub const ADDRESS_CLAIMS: &[&str] = &[
    "formatted",
    "street_address",
    "locality",
    "region",
    "postal_code",
    "country",
];

/// Claim keys in the `phone` group.
pub const PHONE_CLAIMS: &[&str] = &["phone_number", "phone_number_verified"];

/// Project a user record onto the requested claim groups.
///
/// `requested` is a space-delimited list of scope/claim-group names; only
/// the groups `profile`, `email`, `address`, and `phone` select claims.
/// The address group nests its sub-claims under a single `address` key.
#[must_use]
pub fn map_user_claims(user: &IdentityUser, requested: &str, base_url: &str) -> Map<String, Value> {
    let requested: Vec<&str> = requested.split_whitespace().collect();
    let mut claims = Map::new();

    if requested.contains(&"profile") {
        for claim in PROFILE_CLAIMS {
            if let Some(value) = claim_value(user, claim, base_url) {
                claims.insert((*claim).to_string(), value);
            }
        }
    }

    if requested.contains(&"email") {
        for claim in EMAIL_CLAIMS {
            if let Some(value) = claim_value(user, claim, base_url) {
                claims.insert((*claim).to_string(), value);
            }
        }
    }

    if requested.contains(&"address") {
        claims.insert("address".to_string(), Value::Object(address_claims(user)));
    }

    if requested.contains(&"phone") {
        for claim in PHONE_CLAIMS {
            if let Some(value) = claim_value(user, claim, base_url) {
                claims.insert((*claim).to_string(), value);
            }
        }
    }

    claims
}

/// Map a single claim key to its value.
///
/// Returns `None` when the claim must be omitted entirely (the
/// profile/picture URLs of a record without an id); a present-but-unknown
/// value is `Value::Null`.
fn claim_value(user: &IdentityUser, claim: &str, base_url: &str) -> Option<Value> {
    fn opt(value: &Option<String>) -> Value {
        value.clone().map_or(Value::Null, Value::String)
    }

    let value = match claim {
        "name" => Value::String(user.full_name()),
        "given_name" => Value::String(user.first_name.clone()),
        "family_name" => Value::String(user.last_name.clone()),
        "middle_name" => opt(&user.middle_name),
        "nickname" => opt(&user.alternate_name),
        "preferred_username" => Value::String(user.username.clone()),
        "profile" => return profile_url(user, base_url).map(Value::String),
        "picture" => return picture_url(user, base_url).map(Value::String),
        "email" => Value::String(user.email.clone()),
        "email_verified" => Value::Bool(user.email_verified()),
        // The identity store records neither gender nor birthdate.
        "gender" | "birthdate" => Value::Null,
        "zoneinfo" => opt(&user.timezone),
        "locale" => opt(&user.language),
        "updated_at" => user.updated_at.map_or(Value::Null, Value::from),
        "website" => opt(&user.website),
        "phone_number" => user
            .phone_number()
            .map_or(Value::Null, |p| Value::String(p.to_string())),
        // The identity store never verifies phone numbers.
        "phone_number_verified" => Value::Bool(false),
        _ => user.field(claim),
    };

    Some(value)
}

/// Build the nested address claim object.
///
/// Each sub-claim derives from the discrete profile fields; `country` is
/// always sourced from the dedicated country field.
fn address_claims(user: &IdentityUser) -> Map<String, Value> {
    let best_line = user
        .address
        .as_deref()
        .or(user.city.as_deref())
        .or(user.country.as_deref());

    let mut claims = Map::new();
    for claim in ADDRESS_CLAIMS {
        let value = if *claim == "country" {
            user.country
                .clone()
                .map_or(Value::Null, Value::String)
        } else {
            best_line.map_or(Value::Null, |line| Value::String(line.to_string()))
        };
        claims.insert((*claim).to_string(), value);
    }

    claims
}

fn profile_url(user: &IdentityUser, base_url: &str) -> Option<String> {
    (user.id.as_i64() > 0).then(|| format!("{}/user/{}", base_url, user.id))
}

fn picture_url(user: &IdentityUser, base_url: &str) -> Option<String> {
    (user.id.as_i64() > 0).then(|| format!("{}/user/{}/picture", base_url, user.id))
}
