//! Command handlers for the product service.
//!
//! Used both by the HTTP surface and by the event consumer, so a product
//! created through either path goes through the same duplicate handling.

use catalog_core::error::DomainError;
use catalog_core::store::StoreError;
use tracing::debug;

use crate::domain::commands::{CreateProduct, DeleteProduct};
use crate::domain::model::Product;
use crate::domain::repository::ProductRepository;

/// Handles the `CreateProduct` command: stores the product without its
/// service address.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` if a product with the same id already
/// exists, `DomainError::Infrastructure` for any other storage failure.
pub async fn handle_create_product(
    command: &CreateProduct,
    repo: &dyn ProductRepository,
) -> Result<Product, DomainError> {
    let entity = Product {
        service_address: None,
        ..command.product.clone()
    };

    match repo.insert(&entity).await {
        Ok(()) => {
            debug!(
                correlation_id = %command.correlation_id,
                product_id = entity.product_id,
                "product created"
            );
            Ok(entity)
        }
        Err(StoreError::Conflict(_)) => Err(DomainError::InvalidInput(format!(
            "Duplicate key, Product Id: {}",
            entity.product_id
        ))),
        Err(e) => Err(e.into()),
    }
}

/// Handles the `DeleteProduct` command. Deleting an unknown product
/// succeeds.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the storage call fails.
pub async fn handle_delete_product(
    command: &DeleteProduct,
    repo: &dyn ProductRepository,
) -> Result<(), DomainError> {
    let removed = repo.delete_by_product_id(command.product_id).await?;
    debug!(
        correlation_id = %command.correlation_id,
        product_id = command.product_id,
        removed,
        "product delete applied"
    );
    Ok(())
}
