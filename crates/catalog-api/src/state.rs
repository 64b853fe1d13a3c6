//! Shared state of each hosted service.

use std::sync::Arc;

use catalog_composite::aggregator::ReadAggregator;
use catalog_composite::health::HealthAggregator;
use catalog_composite::writes::CompositeWriter;
use catalog_core::service_address::ServiceAddress;
use catalog_product::domain::repository::ProductRepository;
use catalog_recommendation::domain::repository::RecommendationRepository;
use catalog_review::domain::repository::ReviewRepository;

/// State of the product service.
#[derive(Clone)]
pub struct ProductState {
    pub repository: Arc<dyn ProductRepository>,
    /// Address reported in every product returned.
    pub service_address: ServiceAddress,
}

/// State of the recommendation service.
#[derive(Clone)]
pub struct RecommendationState {
    pub repository: Arc<dyn RecommendationRepository>,
    pub service_address: ServiceAddress,
}

/// State of the review service.
#[derive(Clone)]
pub struct ReviewState {
    pub repository: Arc<dyn ReviewRepository>,
    pub service_address: ServiceAddress,
}

/// State of the composite service.
#[derive(Clone)]
pub struct CompositeState {
    pub aggregator: ReadAggregator,
    pub writer: CompositeWriter,
    pub health: HealthAggregator,
}
