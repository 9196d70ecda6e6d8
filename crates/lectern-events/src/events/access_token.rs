//! Access token lifecycle events.
//!
//! The storage engine distinguishes the insert path from the update path of
//! an access-token upsert; each path publishes its own event type with the
//! same payload shape.

use crate::event::Event;
use lectern_core::UserId;
use serde::{Deserialize, Serialize};

/// A new access token row was inserted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenCreated {
    /// Owner of the token.
    pub user_id: UserId,

    /// Client the token was issued to.
    pub client_id: String,

    /// Granted scopes (space-separated), if any.
    pub scope: Option<String>,

    /// The token value.
    pub access_token: String,

    /// Expiry as a unix timestamp (seconds).
    pub expires: i64,
}

impl Event for AccessTokenCreated {
    const EVENT_TYPE: &'static str = "lectern.oauth2.access_token.created";
}

/// An existing access token row was updated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenUpdated {
    /// Owner of the token.
    pub user_id: UserId,

    /// Client the token was issued to.
    pub client_id: String,

    /// Granted scopes (space-separated), if any.
    pub scope: Option<String>,

    /// The token value.
    pub access_token: String,

    /// Expiry as a unix timestamp (seconds).
    pub expires: i64,
}

impl Event for AccessTokenUpdated {
    const EVENT_TYPE: &'static str = "lectern.oauth2.access_token.updated";
}
