//! Write dispatch: composite writes become events on the family channels.
//!
//! Every operation returns as soon as the transport accepted the event. The
//! owning service applies it later, so callers see eventual consistency.

use std::sync::Arc;

use catalog_core::clock::Clock;
use catalog_core::error::DomainError;
use catalog_product::domain::events::{PRODUCTS_CHANNEL, ProductEvent};
use catalog_product::domain::model::Product;
use catalog_recommendation::domain::events::{RECOMMENDATIONS_CHANNEL, RecommendationEvent};
use catalog_recommendation::domain::model::Recommendation;
use catalog_review::domain::events::{REVIEWS_CHANNEL, ReviewEvent};
use catalog_review::domain::model::Review;
use tracing::info;

use crate::dispatcher::EventDispatcher;

/// Turns composite write requests into family events.
#[derive(Clone)]
pub struct CompositeWriter {
    dispatcher: EventDispatcher,
    clock: Arc<dyn Clock>,
}

impl CompositeWriter {
    #[must_use]
    pub fn new(dispatcher: EventDispatcher, clock: Arc<dyn Clock>) -> Self {
        Self { dispatcher, clock }
    }

    /// Dispatches a product `CREATE` and returns the submitted product.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Dispatch` if the transport rejects the event.
    pub async fn create_product(&self, product: Product) -> Result<Product, DomainError> {
        let event = ProductEvent::create(product.clone(), self.clock.as_ref());
        self.dispatcher.publish(PRODUCTS_CHANNEL, &event).await?;
        Ok(product)
    }

    /// Dispatches a product `DELETE`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Dispatch` if the transport rejects the event.
    pub async fn delete_product(&self, product_id: i32) -> Result<(), DomainError> {
        let event = ProductEvent::delete(product_id, self.clock.as_ref());
        self.dispatcher.publish(PRODUCTS_CHANNEL, &event).await
    }

    /// Dispatches a recommendation `CREATE` and returns the submitted
    /// recommendation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Dispatch` if the transport rejects the event.
    pub async fn create_recommendation(
        &self,
        recommendation: Recommendation,
    ) -> Result<Recommendation, DomainError> {
        let event = RecommendationEvent::create(recommendation.clone(), self.clock.as_ref());
        self.dispatcher
            .publish(RECOMMENDATIONS_CHANNEL, &event)
            .await?;
        Ok(recommendation)
    }

    /// Dispatches a `DELETE` of every recommendation of a product.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Dispatch` if the transport rejects the event.
    pub async fn delete_recommendations(&self, product_id: i32) -> Result<(), DomainError> {
        let event = RecommendationEvent::delete(product_id, self.clock.as_ref());
        self.dispatcher
            .publish(RECOMMENDATIONS_CHANNEL, &event)
            .await
    }

    /// Dispatches a review `CREATE` and returns the submitted review.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Dispatch` if the transport rejects the event.
    pub async fn create_review(&self, review: Review) -> Result<Review, DomainError> {
        let event = ReviewEvent::create(review.clone(), self.clock.as_ref());
        self.dispatcher.publish(REVIEWS_CHANNEL, &event).await?;
        Ok(review)
    }

    /// Dispatches a `DELETE` of every review of a product.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Dispatch` if the transport rejects the event.
    pub async fn delete_reviews(&self, product_id: i32) -> Result<(), DomainError> {
        let event = ReviewEvent::delete(product_id, self.clock.as_ref());
        self.dispatcher.publish(REVIEWS_CHANNEL, &event).await
    }

    /// Deletes a product together with its recommendations and reviews.
    ///
    /// Stops at the first channel that rejects its event; deletes already
    /// accepted stay accepted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Dispatch` if any transport rejects its event.
    pub async fn delete_product_aggregate(&self, product_id: i32) -> Result<(), DomainError> {
        info!(product_id, "deleting product aggregate");
        self.delete_product(product_id).await?;
        self.delete_recommendations(product_id).await?;
        self.delete_reviews(product_id).await
    }
}
