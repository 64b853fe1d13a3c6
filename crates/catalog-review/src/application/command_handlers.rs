//! Command handlers for the review service.

use catalog_core::error::DomainError;
use catalog_core::store::StoreError;
use tracing::debug;

use crate::domain::commands::{CreateReview, DeleteReviews};
use crate::domain::model::Review;
use crate::domain::repository::ReviewRepository;

/// Handles the `CreateReview` command.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` if the `(productId, reviewId)`
/// pair is taken, `DomainError::Infrastructure` for any other storage
/// failure.
pub async fn handle_create_review(
    command: &CreateReview,
    repo: &dyn ReviewRepository,
) -> Result<Review, DomainError> {
    let entity = Review {
        service_address: None,
        ..command.review.clone()
    };

    match repo.insert(&entity).await {
        Ok(()) => {
            debug!(
                correlation_id = %command.correlation_id,
                product_id = entity.product_id,
                review_id = entity.review_id,
                "review created"
            );
            Ok(entity)
        }
        Err(StoreError::Conflict(_)) => Err(DomainError::InvalidInput(format!(
            "Duplicate key, Product Id: {}, Review Id: {}",
            entity.product_id, entity.review_id
        ))),
        Err(e) => Err(e.into()),
    }
}

/// Handles the `DeleteReviews` command.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the storage call fails.
pub async fn handle_delete_reviews(
    command: &DeleteReviews,
    repo: &dyn ReviewRepository,
) -> Result<(), DomainError> {
    let removed = repo.delete_by_product_id(command.product_id).await?;
    debug!(
        correlation_id = %command.correlation_id,
        product_id = command.product_id,
        removed,
        "review delete applied"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::infrastructure::in_memory::InMemoryReviewRepository;

    fn create(review: Review) -> CreateReview {
        CreateReview {
            correlation_id: Uuid::new_v4(),
            review,
        }
    }

    #[tokio::test]
    async fn test_duplicate_pair_is_invalid_input() {
        // Arrange
        let repo = InMemoryReviewRepository::new();
        handle_create_review(&create(Review::new(1, 2, "a", "s", "c")), &repo)
            .await
            .unwrap();

        // Act
        let result =
            handle_create_review(&create(Review::new(1, 2, "b", "s", "d")), &repo)
                .await;

        // Assert
        assert_eq!(
            result.unwrap_err(),
            DomainError::InvalidInput("Duplicate key, Product Id: 1, Review Id: 2".into())
        );
    }

    #[tokio::test]
    async fn test_same_review_id_under_other_product_is_accepted() {
        let repo = InMemoryReviewRepository::new();
        handle_create_review(&create(Review::new(1, 2, "a", "s", "c")), &repo)
            .await
            .unwrap();

        handle_create_review(&create(Review::new(5, 2, "a", "s", "c")), &repo)
            .await
            .unwrap();

        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_delete_removes_every_review_of_the_product() {
        // Arrange
        let repo = InMemoryReviewRepository::new();
        for id in 1..=3 {
            repo.insert(&Review::new(1, id, "a", "s", "c"))
                .await
                .unwrap();
        }
        repo.insert(&Review::new(2, 1, "a", "s", "c"))
            .await
            .unwrap();

        // Act
        handle_delete_reviews(
            &DeleteReviews {
                correlation_id: Uuid::new_v4(),
                product_id: 1,
            },
            &repo,
        )
        .await
        .unwrap();

        // Assert
        assert_eq!(repo.len().await, 1);
        assert!(repo.find_by_product_id(1).await.unwrap().is_empty());
    }
}
