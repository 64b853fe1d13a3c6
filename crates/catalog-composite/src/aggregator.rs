//! Builds the product aggregate from three backends.

use std::sync::Arc;

use catalog_core::error::DomainError;
use catalog_core::service_address::ServiceAddress;
use catalog_recommendation::domain::model::Recommendation;
use catalog_review::domain::model::Review;
use tracing::{info, instrument, warn};

use crate::integration::{ProductBackend, RecommendationBackend, ReviewBackend};
use crate::model::{ProductAggregate, RecommendationSummary, ReviewSummary, ServiceAddresses};

/// Fans each read out to the product, recommendation and review services.
///
/// The product call is mandatory and its error is returned as is. The two
/// satellite calls are best effort: any failure there yields an empty list.
#[derive(Clone)]
pub struct ReadAggregator {
    products: Arc<dyn ProductBackend>,
    recommendations: Arc<dyn RecommendationBackend>,
    reviews: Arc<dyn ReviewBackend>,
    service_address: ServiceAddress,
}

impl ReadAggregator {
    /// Creates an aggregator reporting `service_address` as the composite
    /// instance.
    #[must_use]
    pub fn new(
        products: Arc<dyn ProductBackend>,
        recommendations: Arc<dyn RecommendationBackend>,
        reviews: Arc<dyn ReviewBackend>,
        service_address: ServiceAddress,
    ) -> Self {
        Self {
            products,
            recommendations,
            reviews,
            service_address,
        }
    }

    /// Builds the aggregate for `product_id`.
    ///
    /// # Errors
    ///
    /// Returns the product backend's error unchanged: `NotFound` if the
    /// product does not exist, `InvalidInput` for a rejected id, `Upstream`
    /// for anything else.
    #[instrument(skip(self))]
    pub async fn get_aggregate(&self, product_id: i32) -> Result<ProductAggregate, DomainError> {
        let (product, recommendations, reviews) = tokio::join!(
            self.products.get_product(product_id),
            self.recommendations.get_recommendations(product_id),
            self.reviews.get_reviews(product_id),
        );

        let product = product?;
        let recommendations = recommendations.unwrap_or_else(|e| {
            warn!(error = %e, "recommendations unavailable, returning none");
            Vec::new()
        });
        let reviews = reviews.unwrap_or_else(|e| {
            warn!(error = %e, "reviews unavailable, returning none");
            Vec::new()
        });

        info!(
            recommendations = recommendations.len(),
            reviews = reviews.len(),
            "aggregate assembled"
        );

        let service_addresses = ServiceAddresses {
            cmp: self.service_address.to_string(),
            pro: product.service_address.clone().unwrap_or_default(),
            rev: first_address(reviews.first().map(|r| &r.service_address)),
            rec: first_address(recommendations.first().map(|r| &r.service_address)),
        };

        Ok(ProductAggregate {
            product_id: product.product_id,
            name: product.name,
            weight: product.weight,
            recommendations: recommendations
                .into_iter()
                .map(RecommendationSummary::from)
                .collect(),
            reviews: reviews.into_iter().map(ReviewSummary::from).collect(),
            service_addresses,
        })
    }

    /// Lists a product's recommendations; errors are translated, not
    /// absorbed.
    ///
    /// # Errors
    ///
    /// Returns the recommendation backend's error.
    pub async fn recommendations(&self, product_id: i32) -> Result<Vec<Recommendation>, DomainError> {
        self.recommendations.get_recommendations(product_id).await
    }

    /// Lists a product's reviews; errors are translated, not absorbed.
    ///
    /// # Errors
    ///
    /// Returns the review backend's error.
    pub async fn reviews(&self, product_id: i32) -> Result<Vec<Review>, DomainError> {
        self.reviews.get_reviews(product_id).await
    }
}

fn first_address(address: Option<&Option<String>>) -> String {
    address.cloned().flatten().unwrap_or_default()
}
