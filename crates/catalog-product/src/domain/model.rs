//! The product entity.

use serde::{Deserialize, Serialize};

/// A product as exchanged over HTTP and carried in events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Natural key.
    pub product_id: i32,
    /// Display name.
    pub name: String,
    /// Shipping weight.
    pub weight: i32,
    /// Instance that served the product; never persisted.
    #[serde(default)]
    pub service_address: Option<String>,
}

impl Product {
    /// Creates a product with no service address.
    #[must_use]
    pub fn new(product_id: i32, name: impl Into<String>, weight: i32) -> Self {
        Self {
            product_id,
            name: name.into(),
            weight,
            service_address: None,
        }
    }
}
