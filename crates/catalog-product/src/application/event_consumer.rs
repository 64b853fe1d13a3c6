//! Consumer applying product events delivered on the `products` channel.

use std::sync::Arc;

use async_trait::async_trait;
use catalog_core::bus::{Message, MessageHandler};
use catalog_core::error::DomainError;
use catalog_core::event::{DomainEvent, EventEnvelope};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::application::command_handlers::{handle_create_product, handle_delete_product};
use crate::domain::commands::{CreateProduct, DeleteProduct};
use crate::domain::events::{ProductEvent, ProductEventKind};
use crate::domain::repository::ProductRepository;

/// Applies product events to the local repository.
///
/// Delivery is at-least-once: a redelivered `CREATE` reports
/// `InvalidInput` (duplicate) and leaves the stored product untouched, a
/// redelivered `DELETE` is a no-op.
pub struct ProductEventConsumer {
    repository: Arc<dyn ProductRepository>,
}

impl ProductEventConsumer {
    /// Creates a consumer writing to `repository`.
    #[must_use]
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    /// Applies one event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInput` for a duplicate `CREATE` and
    /// `DomainError::Infrastructure` if storage fails.
    #[instrument(skip(self, event), fields(key = event.key(), event_type = %event.event_type()))]
    pub async fn on_event(
        &self,
        event: ProductEvent,
        correlation_id: Uuid,
    ) -> Result<(), DomainError> {
        info!(created_at = %event.metadata.created_at, "processing product event");

        match event.kind {
            ProductEventKind::Create(product) => {
                info!(product_id = product.product_id, "creating product");
                let command = CreateProduct {
                    correlation_id,
                    product,
                };
                handle_create_product(&command, self.repository.as_ref()).await?;
            }
            ProductEventKind::Delete => {
                info!(product_id = event.metadata.key, "deleting product");
                let command = DeleteProduct {
                    correlation_id,
                    product_id: event.metadata.key,
                };
                handle_delete_product(&command, self.repository.as_ref()).await?;
            }
        }

        info!("product event processed");
        Ok(())
    }
}

#[async_trait]
impl MessageHandler for ProductEventConsumer {
    async fn handle(&self, message: &Message) -> Result<(), DomainError> {
        let event = EventEnvelope::from_bytes(&message.body)
            .and_then(ProductEvent::from_envelope)
            .inspect_err(|e| warn!(message_id = %message.id, error = %e, "rejecting product message"))?;
        self.on_event(event, message.id).await
    }
}
