//! `PostgreSQL` implementation of `ProductRepository`.

use async_trait::async_trait;
use catalog_core::store::StoreError;
use catalog_product::domain::model::Product;
use catalog_product::domain::repository::ProductRepository;
use sqlx::PgPool;
use tracing::debug;

use crate::store_error;

#[derive(sqlx::FromRow)]
struct ProductRow {
    product_id: i32,
    name: String,
    weight: i32,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product::new(row.product_id, row.name, row.weight)
    }
}

/// `PostgreSQL`-backed product repository.
#[derive(Debug, Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    /// Creates a new `PgProductRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn insert(&self, product: &Product) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO products (product_id, name, weight) VALUES ($1, $2, $3)")
            .bind(product.product_id)
            .bind(&product.name)
            .bind(product.weight)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;
        debug!(product_id = product.product_id, "product row inserted");
        Ok(())
    }

    async fn find_by_product_id(&self, product_id: i32) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT product_id, name, weight FROM products WHERE product_id = $1",
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(row.map(Product::from))
    }

    async fn delete_by_product_id(&self, product_id: i32) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE product_id = $1")
            .bind(product_id)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(result.rows_affected())
    }
}
