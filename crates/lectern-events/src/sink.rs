//! Event sink capability.
//!
//! The sink is injected into the storage engine at construction. Publishing
//! is fire-and-forget: the engine never blocks a grant on event delivery,
//! so the trait returns nothing and implementations handle their own
//! failures.

use crate::envelope::EventEnvelope;
use async_trait::async_trait;
use std::sync::Mutex;

/// Capability for receiving domain events.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Publish an event envelope.
    ///
    /// Fire-and-forget: no acknowledgment is required and delivery failures
    /// must not surface to the caller.
    async fn publish(&self, envelope: EventEnvelope);
}

/// Sink that writes events to the tracing log.
///
/// The default sink for hosts that only want an audit trail.
#[derive(Debug, Default, Clone)]
pub struct LogSink;

impl LogSink {
    /// Create a new log sink.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventSink for LogSink {
    async fn publish(&self, envelope: EventEnvelope) {
        tracing::info!(
            event_id = %envelope.event_id,
            event_type = %envelope.event_type,
            payload = %envelope.payload,
            "Domain event published"
        );
    }
}

/// Sink that records events in memory.
///
/// Lets tests assert on what was published without any transport.
#[derive(Debug, Default)]
pub struct MemorySink {
    published: Mutex<Vec<EventEnvelope>>,
}

impl MemorySink {
    /// Create a new empty memory sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a snapshot of everything published so far.
    #[must_use]
    pub fn published(&self) -> Vec<EventEnvelope> {
        self.published.lock().expect("sink poisoned").clone()
    }

    /// Number of events published so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.published.lock().expect("sink poisoned").len()
    }

    /// Whether anything has been published.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl EventSink for MemorySink {
    async fn publish(&self, envelope: EventEnvelope) {
        self.published.lock().expect("sink poisoned").push(envelope);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::AccessTokenCreated;
    use lectern_core::UserId;

    #[tokio::test]
    async fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());

        for token in ["tok-1", "tok-2"] {
            let event = AccessTokenCreated {
                user_id: UserId::from_i64(1),
                client_id: "portal".to_string(),
                scope: None,
                access_token: token.to_string(),
                expires: 1_900_000_000,
            };
            sink.publish(EventEnvelope::new(&event).unwrap()).await;
        }

        let published = sink.published();
        assert_eq!(published.len(), 2);
        assert_eq!(published[0].payload["access_token"], "tok-1");
        assert_eq!(published[1].payload["access_token"], "tok-2");
    }

    #[tokio::test]
    async fn test_log_sink_is_fire_and_forget() {
        let sink = LogSink::new();
        let event = AccessTokenCreated {
            user_id: UserId::from_i64(1),
            client_id: "portal".to_string(),
            scope: None,
            access_token: "tok-1".to_string(),
            expires: 1_900_000_000,
        };
        // Publishing returns nothing; just exercise the path.
        sink.publish(EventEnvelope::new(&event).unwrap()).await;
    }
}
