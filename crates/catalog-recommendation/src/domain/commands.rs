//! Commands for the recommendation service.

use uuid::Uuid;

use super::model::Recommendation;

/// Command to store a new recommendation.
#[derive(Debug, Clone)]
pub struct CreateRecommendation {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The recommendation to store.
    pub recommendation: Recommendation,
}

/// Command to remove every recommendation of a product.
#[derive(Debug, Clone)]
pub struct DeleteRecommendations {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The product identifier.
    pub product_id: i32,
}
