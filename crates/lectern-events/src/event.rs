//! Event trait definition for type-safe event publishing.

use serde::{de::DeserializeOwned, Serialize};

/// Trait for types that can be published as domain events.
///
/// Implementors define the fully qualified event type name; payloads are
/// serialized as JSON when wrapped in an [`crate::EventEnvelope`].
///
/// # Example
///
/// ```rust
/// use serde::{Serialize, Deserialize};
/// use lectern_events::Event;
///
/// #[derive(Debug, Serialize, Deserialize)]
/// pub struct ClientRegistered {
///     pub client_id: String,
/// }
///
/// impl Event for ClientRegistered {
///     const EVENT_TYPE: &'static str = "lectern.oauth2.client.registered";
/// }
/// ```
pub trait Event: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The fully qualified event type name.
    ///
    /// Stored in the event envelope for routing and deserialization.
    /// Convention: `lectern.<subsystem>.<entity>.<action>`.
    const EVENT_TYPE: &'static str;
}
