//! `PostgreSQL` implementation of `RecommendationRepository`.

use async_trait::async_trait;
use catalog_core::store::StoreError;
use catalog_recommendation::domain::model::Recommendation;
use catalog_recommendation::domain::repository::RecommendationRepository;
use sqlx::PgPool;

use crate::store_error;

#[derive(sqlx::FromRow)]
struct RecommendationRow {
    product_id: i32,
    recommendation_id: i32,
    author: String,
    rate: i32,
    content: String,
}

impl From<RecommendationRow> for Recommendation {
    fn from(row: RecommendationRow) -> Self {
        Recommendation::new(
            row.product_id,
            row.recommendation_id,
            row.author,
            row.rate,
            row.content,
        )
    }
}

/// `PostgreSQL`-backed recommendation repository.
#[derive(Debug, Clone)]
pub struct PgRecommendationRepository {
    pool: PgPool,
}

impl PgRecommendationRepository {
    /// Creates a new `PgRecommendationRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecommendationRepository for PgRecommendationRepository {
    async fn insert(&self, recommendation: &Recommendation) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO recommendations (product_id, recommendation_id, author, rate, content) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(recommendation.product_id)
        .bind(recommendation.recommendation_id)
        .bind(&recommendation.author)
        .bind(recommendation.rate)
        .bind(&recommendation.content)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(())
    }

    async fn find_by_product_id(
        &self,
        product_id: i32,
    ) -> Result<Vec<Recommendation>, StoreError> {
        let rows = sqlx::query_as::<_, RecommendationRow>(
            "SELECT product_id, recommendation_id, author, rate, content \
             FROM recommendations WHERE product_id = $1 ORDER BY recommendation_id",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(rows.into_iter().map(Recommendation::from).collect())
    }

    async fn delete_by_product_id(&self, product_id: i32) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM recommendations WHERE product_id = $1")
            .bind(product_id)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(result.rows_affected())
    }
}
