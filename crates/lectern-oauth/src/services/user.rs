//! User credential checks and account upsert, delegated to the identity
//! provider.

use crate::error::OAuthError;
use crate::identity::{IdentityProvider, IdentityUser, ProfileUpdate};
use std::sync::Arc;

/// Service bridging the storage contract's user operations to the host's
/// identity store.
#[derive(Clone)]
pub struct UserService {
    identity: Arc<dyn IdentityProvider>,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self { identity }
    }

    /// Verify a username/password pair.
    ///
    /// Password verification is entirely the identity provider's; an
    /// unknown username is simply `false`.
    pub async fn check_user_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<bool, OAuthError> {
        match self.identity.find_by_username(username).await? {
            Some(user) => self.identity.verify_password(&user, password).await,
            None => Ok(false),
        }
    }

    /// Fetch a user record by login name.
    pub async fn get_user_details(
        &self,
        username: &str,
    ) -> Result<Option<IdentityUser>, OAuthError> {
        self.identity.find_by_username(username).await
    }

    /// Create or update an account.
    ///
    /// An existing account gets its password replaced and any non-empty
    /// name fields applied; otherwise a fresh account is created and the
    /// names applied afterwards.
    pub async fn set_user(
        &self,
        username: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<(), OAuthError> {
        let names = ProfileUpdate {
            password: None,
            first_name: (!first_name.is_empty()).then(|| first_name.to_string()),
            last_name: (!last_name.is_empty()).then(|| last_name.to_string()),
        };

        match self.identity.find_by_username(username).await? {
            Some(_) => {
                let update = ProfileUpdate {
                    password: Some(password.to_string()),
                    ..names
                };
                self.identity.update_profile(username, update).await
            }
            None => {
                self.identity.create_account(username, password).await?;
                if names.first_name.is_some() || names.last_name.is_some() {
                    self.identity.update_profile(username, names).await?;
                }
                Ok(())
            }
        }
    }
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish_non_exhaustive()
    }
}
