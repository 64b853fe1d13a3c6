//! Recommendation events carried on the `recommendations` channel.

use catalog_core::clock::Clock;
use catalog_core::error::DomainError;
use catalog_core::event::{DomainEvent, EventEnvelope, EventMetadata, EventType};

use super::model::Recommendation;

/// Channel the composite layer publishes recommendation events on.
pub const RECOMMENDATIONS_CHANNEL: &str = "recommendations";

/// Event payload variants for recommendations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecommendationEventKind {
    /// Store the recommendation.
    Create(Recommendation),
    /// Remove every recommendation of the product identified by the key.
    Delete,
}

/// Recommendation event, keyed by product id so that all events of one
/// product share a partition.
#[derive(Debug, Clone)]
pub struct RecommendationEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: RecommendationEventKind,
}

impl RecommendationEvent {
    /// Builds a `CREATE` event.
    #[must_use]
    pub fn create(recommendation: Recommendation, clock: &dyn Clock) -> Self {
        Self {
            metadata: EventMetadata {
                key: recommendation.product_id,
                created_at: clock.now(),
            },
            kind: RecommendationEventKind::Create(recommendation),
        }
    }

    /// Builds a `DELETE` event for all recommendations of a product.
    #[must_use]
    pub fn delete(product_id: i32, clock: &dyn Clock) -> Self {
        Self {
            metadata: EventMetadata {
                key: product_id,
                created_at: clock.now(),
            },
            kind: RecommendationEventKind::Delete,
        }
    }
}

impl DomainEvent for RecommendationEvent {
    fn event_type(&self) -> EventType {
        match self.kind {
            RecommendationEventKind::Create(_) => EventType::Create,
            RecommendationEventKind::Delete => EventType::Delete,
        }
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }

    fn to_envelope(&self) -> Result<EventEnvelope, DomainError> {
        match &self.kind {
            RecommendationEventKind::Create(recommendation) => {
                EventEnvelope::new(EventType::Create, &self.metadata, Some(recommendation))
            }
            RecommendationEventKind::Delete => {
                EventEnvelope::new::<Recommendation>(EventType::Delete, &self.metadata, None)
            }
        }
    }

    fn from_envelope(envelope: EventEnvelope) -> Result<Self, DomainError> {
        let kind = match envelope.kind()? {
            EventType::Create => RecommendationEventKind::Create(envelope.decode_data()?),
            EventType::Delete => RecommendationEventKind::Delete,
        };
        Ok(Self {
            metadata: envelope.metadata(),
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use catalog_test_support::FixedClock;
    use chrono::{TimeZone, Utc};

    use super::*;

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }

    #[test]
    fn test_create_event_is_keyed_by_product_id() {
        let event = RecommendationEvent::create(Recommendation::new(7, 3, "a", 5, "c"), &clock());

        assert_eq!(event.key(), 7);
        assert_eq!(event.event_type(), EventType::Create);
    }

    #[test]
    fn test_create_envelope_round_trips_payload() {
        let recommendation = Recommendation::new(7, 3, "a", 5, "c");
        let envelope = RecommendationEvent::create(recommendation.clone(), &clock())
            .to_envelope()
            .unwrap();

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["data"]["recommendationId"], 3);

        let decoded = RecommendationEvent::from_envelope(envelope).unwrap();
        assert_eq!(decoded.kind, RecommendationEventKind::Create(recommendation));
    }
}
