//! Query handlers for the review service.

use catalog_core::error::DomainError;
use catalog_core::service_address::ServiceAddress;
use tracing::debug;

use crate::domain::model::Review;
use crate::domain::repository::ReviewRepository;

/// Lists the reviews of a product, each stamped with the answering
/// instance's address. An unknown product yields an empty list.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` if `product_id` is below 1 and
/// `DomainError::Infrastructure` if the storage call fails.
pub async fn get_reviews(
    product_id: i32,
    repo: &dyn ReviewRepository,
    service_address: &ServiceAddress,
) -> Result<Vec<Review>, DomainError> {
    if product_id < 1 {
        return Err(DomainError::InvalidInput(format!(
            "Invalid productId: {product_id}"
        )));
    }

    let mut reviews = repo.find_by_product_id(product_id).await?;
    for review in &mut reviews {
        review.service_address = Some(service_address.to_string());
    }

    debug!(product_id, count = reviews.len(), "reviews found");
    Ok(reviews)
}
