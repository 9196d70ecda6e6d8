//! Error types for the lectern-events crate.

use thiserror::Error;

/// Event publishing errors.
#[derive(Debug, Error)]
pub enum EventError {
    /// An event payload could not be serialized to JSON.
    #[error("Failed to serialize event {event_type}: {cause}")]
    SerializationFailed {
        /// The event type that failed to serialize.
        event_type: String,
        /// The underlying serialization error message.
        cause: String,
    },
}

impl EventError {
    /// Check if this error indicates a serialization problem.
    #[must_use]
    pub fn is_serialization_failed(&self) -> bool {
        matches!(self, EventError::SerializationFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EventError::SerializationFailed {
            event_type: "lectern.oauth2.access_token.created".to_string(),
            cause: "boom".to_string(),
        };
        assert!(err.to_string().contains("access_token.created"));
        assert!(err.is_serialization_failed());
    }
}
