//! Consumer applying review events from the `reviews`
//! channel.

use std::sync::Arc;

use async_trait::async_trait;
use catalog_core::bus::{Message, MessageHandler};
use catalog_core::error::DomainError;
use catalog_core::event::{DomainEvent, EventEnvelope};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::application::command_handlers::{
    handle_create_review, handle_delete_reviews,
};
use crate::domain::commands::{CreateReview, DeleteReviews};
use crate::domain::events::{ReviewEvent, ReviewEventKind};
use crate::domain::repository::ReviewRepository;

/// Applies review events to the local repository.
pub struct ReviewEventConsumer {
    repository: Arc<dyn ReviewRepository>,
}

impl ReviewEventConsumer {
    /// Creates a consumer writing to `repository`.
    #[must_use]
    pub fn new(repository: Arc<dyn ReviewRepository>) -> Self {
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
        event: ReviewEvent,
        correlation_id: Uuid,
    ) -> Result<(), DomainError> {
        info!(created_at = %event.metadata.created_at, "processing review event");

        match event.kind {
            ReviewEventKind::Create(review) => {
                info!(
                    product_id = review.product_id,
                    review_id = review.review_id,
                    "creating review"
                );
                let command = CreateReview {
                    correlation_id,
                    review,
                };
                handle_create_review(&command, self.repository.as_ref()).await?;
            }
            ReviewEventKind::Delete => {
                info!(product_id = event.metadata.key, "deleting reviews");
                let command = DeleteReviews {
                    correlation_id,
                    product_id: event.metadata.key,
                };
                handle_delete_reviews(&command, self.repository.as_ref()).await?;
            }
        }

        info!("review event processed");
        Ok(())
    }
}

#[async_trait]
impl MessageHandler for ReviewEventConsumer {
    async fn handle(&self, message: &Message) -> Result<(), DomainError> {
        let event = EventEnvelope::from_bytes(&message.body)
            .and_then(ReviewEvent::from_envelope)
            .inspect_err(|e| {
                warn!(message_id = %message.id, error = %e, "rejecting review message");
            })?;
        self.on_event(event, message.id).await
    }
}
