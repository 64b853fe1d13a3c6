//! Product events carried on the `products` channel.

use catalog_core::clock::Clock;
use catalog_core::error::DomainError;
use catalog_core::event::{DomainEvent, EventEnvelope, EventMetadata, EventType};

use super::model::Product;

/// Channel the composite layer publishes product events on.
pub const PRODUCTS_CHANNEL: &str = "products";

/// Event payload variants for products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductEventKind {
    /// Store the product.
    Create(Product),
    /// Remove the product identified by the event key.
    Delete,
}

/// Product event envelope.
#[derive(Debug, Clone)]
pub struct ProductEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: ProductEventKind,
}

impl ProductEvent {
    /// Builds a `CREATE` event keyed by the product id.
    #[must_use]
    pub fn create(product: Product, clock: &dyn Clock) -> Self {
        Self {
            metadata: EventMetadata {
                key: product.product_id,
                created_at: clock.now(),
            },
            kind: ProductEventKind::Create(product),
        }
    }

    /// Builds a `DELETE` event for the product id.
    #[must_use]
    pub fn delete(product_id: i32, clock: &dyn Clock) -> Self {
        Self {
            metadata: EventMetadata {
                key: product_id,
                created_at: clock.now(),
            },
            kind: ProductEventKind::Delete,
        }
    }
}

impl DomainEvent for ProductEvent {
    fn event_type(&self) -> EventType {
        match self.kind {
            ProductEventKind::Create(_) => EventType::Create,
            ProductEventKind::Delete => EventType::Delete,
        }
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }

    fn to_envelope(&self) -> Result<EventEnvelope, DomainError> {
        match &self.kind {
            ProductEventKind::Create(product) => {
                EventEnvelope::new(EventType::Create, &self.metadata, Some(product))
            }
            ProductEventKind::Delete => {
                EventEnvelope::new::<Product>(EventType::Delete, &self.metadata, None)
            }
        }
    }

    fn from_envelope(envelope: EventEnvelope) -> Result<Self, DomainError> {
        let kind = match envelope.kind()? {
            EventType::Create => ProductEventKind::Create(envelope.decode_data()?),
            EventType::Delete => ProductEventKind::Delete,
        };
        Ok(Self {
            metadata: envelope.metadata(),
            kind,
        })
    }
}
