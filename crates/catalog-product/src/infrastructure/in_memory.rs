//! In-memory `ProductRepository`, used in standalone mode and tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use catalog_core::store::StoreError;
use tokio::sync::RwLock;

use crate::domain::model::Product;
use crate::domain::repository::ProductRepository;

/// Product table held in process memory, keyed by product id.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    rows: RwLock<BTreeMap<i32, Product>>,
}

impl InMemoryProductRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored products.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Returns `true` if no product is stored.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, product: &Product) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&product.product_id) {
            return Err(StoreError::Conflict(format!(
                "product {} already exists",
                product.product_id
            )));
        }
        rows.insert(product.product_id, product.clone());
        Ok(())
    }

    async fn find_by_product_id(&self, product_id: i32) -> Result<Option<Product>, StoreError> {
        Ok(self.rows.read().await.get(&product_id).cloned())
    }

    async fn delete_by_product_id(&self, product_id: i32) -> Result<u64, StoreError> {
        Ok(u64::from(self.rows.write().await.remove(&product_id).is_some()))
    }
}
