//! Storage port for products.

use async_trait::async_trait;
use catalog_core::store::StoreError;

use super::model::Product;

/// Repository for product entities, unique by `product_id`.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Inserts a product.
    ///
    /// Returns `StoreError::Conflict` if a product with the same id exists.
    async fn insert(&self, product: &Product) -> Result<(), StoreError>;

    /// Looks up a product by id.
    async fn find_by_product_id(&self, product_id: i32) -> Result<Option<Product>, StoreError>;

    /// Deletes the product with the given id, returning the number of rows
    /// removed.
    async fn delete_by_product_id(&self, product_id: i32) -> Result<u64, StoreError>;
}
