//! Query handlers for the product service.

use catalog_core::error::DomainError;
use catalog_core::service_address::ServiceAddress;
use tracing::debug;

use crate::domain::model::Product;
use crate::domain::repository::ProductRepository;

/// Retrieves a product and stamps it with the answering instance's address.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` if `product_id` is below 1,
/// `DomainError::NotFound` if no product exists for it, and
/// `DomainError::Infrastructure` if the storage call fails.
pub async fn get_product(
    product_id: i32,
    repo: &dyn ProductRepository,
    service_address: &ServiceAddress,
) -> Result<Product, DomainError> {
    if product_id < 1 {
        return Err(DomainError::InvalidInput(format!(
            "Invalid productId: {product_id}"
        )));
    }

    let mut product = repo
        .find_by_product_id(product_id)
        .await?
        .ok_or_else(|| {
            DomainError::NotFound(format!("No product found for productId: {product_id}"))
        })?;
    product.service_address = Some(service_address.to_string());

    debug!(product_id, "product found");
    Ok(product)
}
