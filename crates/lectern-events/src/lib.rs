//! # lectern-events
//!
//! Domain events emitted by the Lectern OAuth2 storage engine, and the
//! event-sink capability they are published through.
//!
//! The storage engine emits events at exactly two points: when an access
//! token row is created and when an existing row is updated in place. The
//! sink is an injected capability so the host decides where events go
//! (audit log, message bus, nothing) and tests can assert on what was
//! published without any transport.
//!
//! ## Example
//!
//! ```rust
//! use lectern_core::UserId;
//! use lectern_events::{AccessTokenCreated, EventEnvelope};
//!
//! let event = AccessTokenCreated {
//!     user_id: UserId::from_i64(5),
//!     client_id: "portal".to_string(),
//!     scope: Some("openid profile".to_string()),
//!     access_token: "tok-1".to_string(),
//!     expires: 1_900_000_000,
//! };
//!
//! let envelope = EventEnvelope::new(&event).unwrap();
//! assert_eq!(envelope.event_type, "lectern.oauth2.access_token.created");
//! ```

pub mod envelope;
pub mod error;
pub mod event;
pub mod events;
pub mod sink;

pub use envelope::EventEnvelope;
pub use error::EventError;
pub use event::Event;
pub use events::{AccessTokenCreated, AccessTokenUpdated};
pub use sink::{EventSink, LogSink, MemorySink};
