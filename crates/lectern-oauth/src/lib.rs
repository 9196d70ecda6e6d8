//! # lectern-oauth
//!
//! OAuth2/OpenID Connect storage and claims engine for the Lectern
//! learning platform.
//!
//! This crate is the persistence-and-claims core an authorization-server
//! runtime builds on. It owns:
//!
//! - client registrations and credential checks;
//! - access token, refresh token, and authorization code lifecycle
//!   (upsert, lookup, one-time-use invalidation);
//! - scope existence and default-scope resolution;
//! - signing key lookup with per-client → default fallback;
//! - OpenID Connect UserInfo claim mapping from the host's identity store.
//!
//! Grant-type orchestration, token issuance, HTTP transport, and the
//! identity store itself are external collaborators. The identity store is
//! reached through the [`IdentityProvider`] trait; audit events leave
//! through the injected [`lectern_events::EventSink`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use lectern_events::LogSink;
//! use lectern_oauth::{OAuthConfig, OAuthStorage};
//!
//! let storage = OAuthStorage::new(
//!     pool,
//!     identity_provider,
//!     Arc::new(LogSink::new()),
//!     OAuthConfig::new("https://lms.example.edu"),
//! );
//!
//! if storage.clients().check_client_credentials("portal", Some("s3cret")).await? {
//!     // authenticated; proceed with the grant
//! }
//! ```

pub mod claims;
pub mod config;
pub mod error;
pub mod identity;
pub mod services;
pub mod storage;

pub use config::OAuthConfig;
pub use error::OAuthError;
pub use identity::{IdentityProvider, IdentityUser, ProfileUpdate};
pub use storage::OAuthStorage;
