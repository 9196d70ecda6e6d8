//! Event envelope wrapping payloads with metadata.

use crate::error::EventError;
use crate::event::Event;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Standard envelope wrapping every published event.
///
/// Carries the metadata a sink needs for audit and routing; the payload is
/// kept as JSON so the envelope stays object-safe for the
/// [`crate::EventSink`] trait.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique identifier for this event instance.
    pub event_id: Uuid,

    /// Fully qualified event type name, e.g.
    /// `lectern.oauth2.access_token.created`.
    pub event_type: String,

    /// Timestamp when the event was created.
    pub occurred_at: DateTime<Utc>,

    /// The serialized event payload.
    pub payload: serde_json::Value,
}

impl EventEnvelope {
    /// Wrap an event payload in a new envelope.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::SerializationFailed`] if the payload cannot be
    /// serialized to JSON.
    pub fn new<E: Event>(payload: &E) -> Result<Self, EventError> {
        let payload = serde_json::to_value(payload).map_err(|e| EventError::SerializationFailed {
            event_type: E::EVENT_TYPE.to_string(),
            cause: e.to_string(),
        })?;

        Ok(Self {
            event_id: Uuid::new_v4(),
            event_type: E::EVENT_TYPE.to_string(),
            occurred_at: Utc::now(),
            payload,
        })
    }

    /// Create an envelope with a specific event id.
    ///
    /// Useful for testing or replaying events.
    pub fn with_id<E: Event>(event_id: Uuid, payload: &E) -> Result<Self, EventError> {
        let mut envelope = Self::new(payload)?;
        envelope.event_id = event_id;
        Ok(envelope)
    }

    /// Deserialize the payload back into its typed event.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::SerializationFailed`] if the payload does not
    /// match the requested event type.
    pub fn payload_as<E: Event>(&self) -> Result<E, EventError> {
        serde_json::from_value(self.payload.clone()).map_err(|e| {
            EventError::SerializationFailed {
                event_type: E::EVENT_TYPE.to_string(),
                cause: e.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::AccessTokenCreated;
    use lectern_core::UserId;

    fn sample_event() -> AccessTokenCreated {
        AccessTokenCreated {
            user_id: UserId::from_i64(5),
            client_id: "portal".to_string(),
            scope: Some("openid".to_string()),
            access_token: "tok-1".to_string(),
            expires: 1_900_000_000,
        }
    }

    #[test]
    fn test_envelope_carries_event_type() {
        let envelope = EventEnvelope::new(&sample_event()).unwrap();
        assert_eq!(envelope.event_type, AccessTokenCreated::EVENT_TYPE);
        assert_eq!(envelope.payload["client_id"], "portal");
    }

    #[test]
    fn test_payload_round_trip() {
        let envelope = EventEnvelope::new(&sample_event()).unwrap();
        let back: AccessTokenCreated = envelope.payload_as().unwrap();
        assert_eq!(back.user_id, UserId::from_i64(5));
        assert_eq!(back.access_token, "tok-1");
    }

    #[test]
    fn test_with_id_preserves_id() {
        let id = Uuid::new_v4();
        let envelope = EventEnvelope::with_id(id, &sample_event()).unwrap();
        assert_eq!(envelope.event_id, id);
    }
}
