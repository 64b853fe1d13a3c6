//! In-memory `ReviewRepository`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use catalog_core::store::StoreError;
use tokio::sync::RwLock;

use crate::domain::model::Review;
use crate::domain::repository::ReviewRepository;

/// Reviews keyed by `(product_id, review_id)`.
#[derive(Debug, Default)]
pub struct InMemoryReviewRepository {
    rows: RwLock<BTreeMap<(i32, i32), Review>>,
}

impl InMemoryReviewRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored reviews, across all products.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Returns `true` if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn insert(&self, review: &Review) -> Result<(), StoreError> {
        let key = (review.product_id, review.review_id);
        let mut rows = self.rows.write().await;
        if rows.contains_key(&key) {
            return Err(StoreError::Conflict(format!(
                "review {key:?} already exists"
            )));
        }
        rows.insert(key, review.clone());
        Ok(())
    }

    async fn find_by_product_id(
        &self,
        product_id: i32,
    ) -> Result<Vec<Review>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows
            .range((product_id, i32::MIN)..=(product_id, i32::MAX))
            .map(|(_, r)| r.clone())
            .collect())
    }

    async fn delete_by_product_id(&self, product_id: i32) -> Result<u64, StoreError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|(pid, _), _| *pid != product_id);
        Ok((before - rows.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_returns_only_rows_of_the_product() {
        let repo = InMemoryReviewRepository::new();
        repo.insert(&Review::new(1, 1, "a", "s", "c"))
            .await
            .unwrap();
        repo.insert(&Review::new(2, 1, "a", "s", "c"))
            .await
            .unwrap();

        let found = repo.find_by_product_id(1).await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].product_id, 1);
    }

    #[tokio::test]
    async fn test_delete_reports_removed_rows() {
        let repo = InMemoryReviewRepository::new();
        repo.insert(&Review::new(1, 1, "a", "s", "c"))
            .await
            .unwrap();
        repo.insert(&Review::new(1, 2, "a", "s", "c"))
            .await
            .unwrap();

        assert_eq!(repo.delete_by_product_id(1).await.unwrap(), 2);
        assert_eq!(repo.delete_by_product_id(1).await.unwrap(), 0);
    }
}
