//! Review events carried on the `reviews` channel.

use catalog_core::clock::Clock;
use catalog_core::error::DomainError;
use catalog_core::event::{DomainEvent, EventEnvelope, EventMetadata, EventType};

use super::model::Review;

/// Channel the composite layer publishes review events on.
pub const REVIEWS_CHANNEL: &str = "reviews";

/// Event payload variants for reviews.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewEventKind {
    /// Store the review.
    Create(Review),
    /// Remove every review of the product identified by the key.
    Delete,
}

/// Review event, keyed by product id so that all events of one
/// product share a partition.
#[derive(Debug, Clone)]
pub struct ReviewEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: ReviewEventKind,
}

impl ReviewEvent {
    /// Builds a `CREATE` event.
    #[must_use]
    pub fn create(review: Review, clock: &dyn Clock) -> Self {
        Self {
            metadata: EventMetadata {
                key: review.product_id,
                created_at: clock.now(),
            },
            kind: ReviewEventKind::Create(review),
        }
    }

    /// Builds a `DELETE` event for all reviews of a product.
    #[must_use]
    pub fn delete(product_id: i32, clock: &dyn Clock) -> Self {
        Self {
            metadata: EventMetadata {
                key: product_id,
                created_at: clock.now(),
            },
            kind: ReviewEventKind::Delete,
        }
    }
}

impl DomainEvent for ReviewEvent {
    fn event_type(&self) -> EventType {
        match self.kind {
            ReviewEventKind::Create(_) => EventType::Create,
            ReviewEventKind::Delete => EventType::Delete,
        }
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }

    fn to_envelope(&self) -> Result<EventEnvelope, DomainError> {
        match &self.kind {
            ReviewEventKind::Create(review) => {
                EventEnvelope::new(EventType::Create, &self.metadata, Some(review))
            }
            ReviewEventKind::Delete => {
                EventEnvelope::new::<Review>(EventType::Delete, &self.metadata, None)
            }
        }
    }

    fn from_envelope(envelope: EventEnvelope) -> Result<Self, DomainError> {
        let kind = match envelope.kind()? {
            EventType::Create => ReviewEventKind::Create(envelope.decode_data()?),
            EventType::Delete => ReviewEventKind::Delete,
        };
        Ok(Self {
            metadata: envelope.metadata(),
            kind,
        })
    }
}
