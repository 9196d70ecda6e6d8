//! UserInfo claims resolution.

use crate::claims::map_user_claims;
use crate::config::OAuthConfig;
use crate::error::OAuthError;
use crate::identity::IdentityProvider;
use lectern_core::UserId;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Service resolving OIDC UserInfo claims for a user id.
#[derive(Clone)]
pub struct UserInfoService {
    identity: Arc<dyn IdentityProvider>,
    base_url: String,
}

impl UserInfoService {
    /// Create a new UserInfo service.
    #[must_use]
    pub fn new(identity: Arc<dyn IdentityProvider>, config: &OAuthConfig) -> Self {
        Self {
            identity,
            base_url: config.base_url.clone(),
        }
    }

    /// Claims for the given user, selected by the requested claim groups.
    ///
    /// Lookup is by numeric id (distinct from the by-username lookup used
    /// for credential checks). An unknown user yields an empty claim set,
    /// not an error.
    pub async fn get_user_claims(
        &self,
        user_id: UserId,
        requested: &str,
    ) -> Result<Map<String, Value>, OAuthError> {
        match self.identity.find_by_id(user_id).await? {
            Some(user) => Ok(map_user_claims(&user, requested, &self.base_url)),
            None => {
                tracing::debug!(%user_id, "Claims requested for unknown user");
                Ok(Map::new())
            }
        }
    }
}

impl std::fmt::Debug for UserInfoService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserInfoService")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
