//! `PostgreSQL` adapters for the product, recommendation and review
//! repositories.

pub mod pg_product_repository;
pub mod pg_recommendation_repository;
pub mod pg_review_repository;

use catalog_core::store::StoreError;
use sqlx::migrate::Migrator;

/// Schema migrations shared by all three owning services.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Maps a driver error onto the storage outcome the services understand.
pub(crate) fn store_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::Conflict(db.message().to_owned())
        }
        other => StoreError::Backend(other.to_string()),
    }
}
