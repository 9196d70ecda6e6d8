//! Event payload definitions.

mod access_token;

pub use access_token::{AccessTokenCreated, AccessTokenUpdated};
