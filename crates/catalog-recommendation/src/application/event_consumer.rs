//! Consumer applying recommendation events from the `recommendations`
//! channel.

use std::sync::Arc;

use async_trait::async_trait;
use catalog_core::bus::{Message, MessageHandler};
use catalog_core::error::DomainError;
use catalog_core::event::{DomainEvent, EventEnvelope};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::application::command_handlers::{
    handle_create_recommendation, handle_delete_recommendations,
};
use crate::domain::commands::{CreateRecommendation, DeleteRecommendations};
use crate::domain::events::{RecommendationEvent, RecommendationEventKind};
use crate::domain::repository::RecommendationRepository;

/// Applies recommendation events to the local repository.
pub struct RecommendationEventConsumer {
    repository: Arc<dyn RecommendationRepository>,
}

impl RecommendationEventConsumer {
    /// Creates a consumer writing to `repository`.
    #[must_use]
    pub fn new(repository: Arc<dyn RecommendationRepository>) -> Self {
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
        event: RecommendationEvent,
        correlation_id: Uuid,
    ) -> Result<(), DomainError> {
        info!(created_at = %event.metadata.created_at, "processing recommendation event");

        match event.kind {
            RecommendationEventKind::Create(recommendation) => {
                info!(
                    product_id = recommendation.product_id,
                    recommendation_id = recommendation.recommendation_id,
                    "creating recommendation"
                );
                let command = CreateRecommendation {
                    correlation_id,
                    recommendation,
                };
                handle_create_recommendation(&command, self.repository.as_ref()).await?;
            }
            RecommendationEventKind::Delete => {
                info!(product_id = event.metadata.key, "deleting recommendations");
                let command = DeleteRecommendations {
                    correlation_id,
                    product_id: event.metadata.key,
                };
                handle_delete_recommendations(&command, self.repository.as_ref()).await?;
            }
        }

        info!("recommendation event processed");
        Ok(())
    }
}

#[async_trait]
impl MessageHandler for RecommendationEventConsumer {
    async fn handle(&self, message: &Message) -> Result<(), DomainError> {
        let event = EventEnvelope::from_bytes(&message.body)
            .and_then(RecommendationEvent::from_envelope)
            .inspect_err(|e| {
                warn!(message_id = %message.id, error = %e, "rejecting recommendation message");
            })?;
        self.on_event(event, message.id).await
    }
}
