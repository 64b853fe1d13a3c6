//! Query handlers for the recommendation service.

use catalog_core::error::DomainError;
use catalog_core::service_address::ServiceAddress;
use tracing::debug;

use crate::domain::model::Recommendation;
use crate::domain::repository::RecommendationRepository;

/// Lists the recommendations of a product, each stamped with the answering
/// instance's address. An unknown product yields an empty list.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` if `product_id` is below 1 and
/// `DomainError::Infrastructure` if the storage call fails.
pub async fn get_recommendations(
    product_id: i32,
    repo: &dyn RecommendationRepository,
    service_address: &ServiceAddress,
) -> Result<Vec<Recommendation>, DomainError> {
    if product_id < 1 {
        return Err(DomainError::InvalidInput(format!(
            "Invalid productId: {product_id}"
        )));
    }

    let mut recommendations = repo.find_by_product_id(product_id).await?;
    for recommendation in &mut recommendations {
        recommendation.service_address = Some(service_address.to_string());
    }

    debug!(product_id, count = recommendations.len(), "recommendations found");
    Ok(recommendations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::in_memory::InMemoryRecommendationRepository;

    #[tokio::test]
    async fn test_lists_recommendations_with_service_address() {
        // Arrange
        let repo = InMemoryRecommendationRepository::new();
        repo.insert(&Recommendation::new(1, 2, "a", 1, "c"))
            .await
            .unwrap();
        repo.insert(&Recommendation::new(1, 1, "b", 2, "d"))
            .await
            .unwrap();

        // Act
        let found = get_recommendations(1, &repo, &ServiceAddress::new("rec", 7002))
            .await
            .unwrap();

        // Assert
        let ids: Vec<i32> = found.iter().map(|r| r.recommendation_id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(
            found
                .iter()
                .all(|r| r.service_address.as_deref() == Some("rec:7002"))
        );
    }

    #[tokio::test]
    async fn test_unknown_product_yields_empty_list() {
        let repo = InMemoryRecommendationRepository::new();

        let found = get_recommendations(113, &repo, &ServiceAddress::default())
            .await
            .unwrap();

        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_rejects_non_positive_id() {
        let repo = InMemoryRecommendationRepository::new();

        let result = get_recommendations(0, &repo, &ServiceAddress::default()).await;

        assert_eq!(
            result.unwrap_err(),
            DomainError::InvalidInput("Invalid productId: 0".into())
        );
    }
}
