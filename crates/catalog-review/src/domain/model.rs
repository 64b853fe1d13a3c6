//! The review entity.

use serde::{Deserialize, Serialize};

/// A review of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub product_id: i32,
    pub review_id: i32,
    pub author: String,
    pub subject: String,
    pub content: String,
    /// Instance that served the review; never persisted.
    #[serde(default)]
    pub service_address: Option<String>,
}

impl Review {
    /// Creates a review with no service address.
    #[must_use]
    pub fn new(
        product_id: i32,
        review_id: i32,
        author: impl Into<String>,
        subject: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            product_id,
            review_id,
            author: author.into(),
            subject: subject.into(),
            content: content.into(),
            service_address: None,
        }
    }
}
