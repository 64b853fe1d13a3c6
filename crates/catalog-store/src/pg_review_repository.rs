//! `PostgreSQL` implementation of `ReviewRepository`.

use async_trait::async_trait;
use catalog_core::store::StoreError;
use catalog_review::domain::model::Review;
use catalog_review::domain::repository::ReviewRepository;
use sqlx::PgPool;

use crate::store_error;

#[derive(sqlx::FromRow)]
struct ReviewRow {
    product_id: i32,
    review_id: i32,
    author: String,
    subject: String,
    content: String,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Review::new(
            row.product_id,
            row.review_id,
            row.author,
            row.subject,
            row.content,
        )
    }
}

/// `PostgreSQL`-backed review repository.
#[derive(Debug, Clone)]
pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    async fn insert(&self, review: &Review) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO reviews (product_id, review_id, author, subject, content) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(review.product_id)
        .bind(review.review_id)
        .bind(&review.author)
        .bind(&review.subject)
        .bind(&review.content)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(())
    }

    async fn find_by_product_id(&self, product_id: i32) -> Result<Vec<Review>, StoreError> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            "SELECT product_id, review_id, author, subject, content \
             FROM reviews WHERE product_id = $1 ORDER BY review_id",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(rows.into_iter().map(Review::from).collect())
    }

    async fn delete_by_product_id(&self, product_id: i32) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM reviews WHERE product_id = $1")
            .bind(product_id)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(result.rows_affected())
    }
}
