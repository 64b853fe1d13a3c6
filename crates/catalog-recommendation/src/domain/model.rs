//! The recommendation entity.

use serde::{Deserialize, Serialize};

/// A recommendation of a product by an author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Product the recommendation belongs to.
    pub product_id: i32,
    /// Identifier, unique within the product.
    pub recommendation_id: i32,
    /// Author name.
    pub author: String,
    /// Rating given by the author.
    pub rate: i32,
    /// Free-text body.
    pub content: String,
    /// Instance that served the recommendation; never persisted.
    #[serde(default)]
    pub service_address: Option<String>,
}

impl Recommendation {
    /// Creates a recommendation with no service address.
    #[must_use]
    pub fn new(
        product_id: i32,
        recommendation_id: i32,
        author: impl Into<String>,
        rate: i32,
        content: impl Into<String>,
    ) -> Self {
        Self {
            product_id,
            recommendation_id,
            author: author.into(),
            rate,
            content: content.into(),
            service_address: None,
        }
    }
}
