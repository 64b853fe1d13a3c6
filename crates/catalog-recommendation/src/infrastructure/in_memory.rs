//! In-memory `RecommendationRepository`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use catalog_core::store::StoreError;
use tokio::sync::RwLock;

use crate::domain::model::Recommendation;
use crate::domain::repository::RecommendationRepository;

/// Recommendations keyed by `(product_id, recommendation_id)`.
#[derive(Debug, Default)]
pub struct InMemoryRecommendationRepository {
    rows: RwLock<BTreeMap<(i32, i32), Recommendation>>,
}

impl InMemoryRecommendationRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored recommendations, across all products.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Returns `true` if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl RecommendationRepository for InMemoryRecommendationRepository {
    async fn insert(&self, recommendation: &Recommendation) -> Result<(), StoreError> {
        let key = (recommendation.product_id, recommendation.recommendation_id);
        let mut rows = self.rows.write().await;
        if rows.contains_key(&key) {
            return Err(StoreError::Conflict(format!(
                "recommendation {key:?} already exists"
            )));
        }
        rows.insert(key, recommendation.clone());
        Ok(())
    }

    async fn find_by_product_id(
        &self,
        product_id: i32,
    ) -> Result<Vec<Recommendation>, StoreError> {
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
