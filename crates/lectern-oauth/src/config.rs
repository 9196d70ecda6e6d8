//! Engine configuration.

use crate::error::OAuthError;
use std::env;

/// Environment variable holding the platform's public base URL.
const ENV_BASE_URL: &str = "LECTERN_BASE_URL";

/// Configuration for the OAuth2 storage engine.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    /// Public base URL of the host platform, without a trailing slash.
    /// Used to construct profile and picture claim URLs.
    pub base_url: String,
}

impl OAuthConfig {
    /// Create a config from an explicit base URL.
    ///
    /// A trailing slash is stripped so claim URLs join cleanly.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::ConfigMissing`] when `LECTERN_BASE_URL` is
    /// unset.
    pub fn from_env() -> Result<Self, OAuthError> {
        let base_url = env::var(ENV_BASE_URL).map_err(|_| OAuthError::ConfigMissing {
            var: ENV_BASE_URL.to_string(),
        })?;
        Ok(Self::new(base_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_stripped() {
        let config = OAuthConfig::new("https://lms.example.edu/");
        assert_eq!(config.base_url, "https://lms.example.edu");
    }

    #[test]
    fn test_plain_url_kept() {
        let config = OAuthConfig::new("https://lms.example.edu");
        assert_eq!(config.base_url, "https://lms.example.edu");
    }
}
