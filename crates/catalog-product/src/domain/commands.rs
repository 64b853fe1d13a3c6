//! Commands for the product service.

use uuid::Uuid;

use super::model::Product;

/// Command to store a new product.
#[derive(Debug, Clone)]
pub struct CreateProduct {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The product to store.
    pub product: Product,
}

/// Command to remove a product.
#[derive(Debug, Clone)]
pub struct DeleteProduct {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The product identifier.
    pub product_id: i32,
}
