//! Commands for the review service.

use uuid::Uuid;

use super::model::Review;

/// Command to store a new review.
#[derive(Debug, Clone)]
pub struct CreateReview {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The review to store.
    pub review: Review,
}

/// Command to remove every review of a product.
#[derive(Debug, Clone)]
pub struct DeleteReviews {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The product identifier.
    pub product_id: i32,
}
