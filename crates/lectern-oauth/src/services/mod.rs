//! Per-concern storage services.
//!
//! Each service owns one cohesive slice of the storage contract; the
//! [`crate::OAuthStorage`] façade composes them.

pub mod client;
pub mod code;
pub mod keys;
pub mod scope;
pub mod token;
pub mod user;
pub mod userinfo;

pub use client::{ClientScope, ClientService};
pub use code::AuthorizationCodeService;
pub use keys::KeyService;
pub use scope::ScopeService;
pub use token::TokenService;
pub use user::UserService;
pub use userinfo::UserInfoService;
