//! Command handlers for the recommendation service.

use catalog_core::error::DomainError;
use catalog_core::store::StoreError;
use tracing::debug;

use crate::domain::commands::{CreateRecommendation, DeleteRecommendations};
use crate::domain::model::Recommendation;
use crate::domain::repository::RecommendationRepository;

/// Handles the `CreateRecommendation` command.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` if the `(productId, recommendationId)`
/// pair is taken, `DomainError::Infrastructure` for any other storage
/// failure.
pub async fn handle_create_recommendation(
    command: &CreateRecommendation,
    repo: &dyn RecommendationRepository,
) -> Result<Recommendation, DomainError> {
    let entity = Recommendation {
        service_address: None,
        ..command.recommendation.clone()
    };

    match repo.insert(&entity).await {
        Ok(()) => {
            debug!(
                correlation_id = %command.correlation_id,
                product_id = entity.product_id,
                recommendation_id = entity.recommendation_id,
                "recommendation created"
            );
            Ok(entity)
        }
        Err(StoreError::Conflict(_)) => Err(DomainError::InvalidInput(format!(
            "Duplicate key, Product Id: {}, Recommendation Id: {}",
            entity.product_id, entity.recommendation_id
        ))),
        Err(e) => Err(e.into()),
    }
}

/// Handles the `DeleteRecommendations` command.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the storage call fails.
pub async fn handle_delete_recommendations(
    command: &DeleteRecommendations,
    repo: &dyn RecommendationRepository,
) -> Result<(), DomainError> {
    let removed = repo.delete_by_product_id(command.product_id).await?;
    debug!(
        correlation_id = %command.correlation_id,
        product_id = command.product_id,
        removed,
        "recommendation delete applied"
    );
    Ok(())
}
