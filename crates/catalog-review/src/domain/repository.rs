//! Storage port for reviews.

use async_trait::async_trait;
use catalog_core::store::StoreError;

use super::model::Review;

/// Repository for reviews, unique by `(product_id, review_id)`.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Inserts a review.
    ///
    /// Returns `StoreError::Conflict` if the pair of ids is already taken.
    async fn insert(&self, review: &Review) -> Result<(), StoreError>;

    /// Lists the reviews of a product, ordered by review id.
    async fn find_by_product_id(&self, product_id: i32)
    -> Result<Vec<Review>, StoreError>;

    /// Deletes every review of a product, returning the number of
    /// rows removed.
    async fn delete_by_product_id(&self, product_id: i32) -> Result<u64, StoreError>;
}
