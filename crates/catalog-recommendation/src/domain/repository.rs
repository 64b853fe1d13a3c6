//! Storage port for recommendations.

use async_trait::async_trait;
use catalog_core::store::StoreError;

use super::model::Recommendation;

/// Repository for recommendations, unique by `(product_id, recommendation_id)`.
#[async_trait]
pub trait RecommendationRepository: Send + Sync {
    /// Inserts a recommendation.
    ///
    /// Returns `StoreError::Conflict` if the pair of ids is already taken.
    async fn insert(&self, recommendation: &Recommendation) -> Result<(), StoreError>;

    /// Lists the recommendations of a product, ordered by recommendation id.
    async fn find_by_product_id(&self, product_id: i32)
    -> Result<Vec<Recommendation>, StoreError>;

    /// Deletes every recommendation of a product, returning the number of
    /// rows removed.
    async fn delete_by_product_id(&self, product_id: i32) -> Result<u64, StoreError>;
}
