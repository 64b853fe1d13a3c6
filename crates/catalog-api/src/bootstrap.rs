//! Composition root: builds the transport, the consumers, the composite
//! collaborators and the four routers, and wires them together.

use std::sync::Arc;

use axum::Router;
use catalog_bus::PartitionedBus;
use catalog_composite::aggregator::ReadAggregator;
use catalog_composite::dispatcher::EventDispatcher;
use catalog_composite::health::HealthAggregator;
use catalog_composite::integration::{
    ProductHttpClient, RecommendationHttpClient, ReviewHttpClient,
};
use catalog_composite::writes::CompositeWriter;
use catalog_core::clock::SystemClock;
use catalog_core::service_address::ServiceAddress;
use catalog_product::application::event_consumer::ProductEventConsumer;
use catalog_product::domain::events::PRODUCTS_CHANNEL;
use catalog_product::domain::repository::ProductRepository;
use catalog_product::infrastructure::in_memory::InMemoryProductRepository;
use catalog_recommendation::application::event_consumer::RecommendationEventConsumer;
use catalog_recommendation::domain::events::RECOMMENDATIONS_CHANNEL;
use catalog_recommendation::domain::repository::RecommendationRepository;
use catalog_recommendation::infrastructure::in_memory::InMemoryRecommendationRepository;
use catalog_review::application::event_consumer::ReviewEventConsumer;
use catalog_review::domain::events::REVIEWS_CHANNEL;
use catalog_review::domain::repository::ReviewRepository;
use catalog_review::infrastructure::in_memory::InMemoryReviewRepository;
use catalog_store::pg_product_repository::PgProductRepository;
use catalog_store::pg_recommendation_repository::PgRecommendationRepository;
use catalog_store::pg_review_repository::PgReviewRepository;
use sqlx::PgPool;
use tracing::info;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::routes;
use crate::state::{CompositeState, ProductState, RecommendationState, ReviewState};

/// Storage of the three owning services.
#[derive(Clone)]
pub struct Repositories {
    pub products: Arc<dyn ProductRepository>,
    pub recommendations: Arc<dyn RecommendationRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
}

impl Repositories {
    /// Process-local stores; contents are lost on exit.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            products: Arc::new(InMemoryProductRepository::new()),
            recommendations: Arc::new(InMemoryRecommendationRepository::new()),
            reviews: Arc::new(InMemoryReviewRepository::new()),
        }
    }

    /// Postgres stores sharing one pool.
    #[must_use]
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            products: Arc::new(PgProductRepository::new(pool.clone())),
            recommendations: Arc::new(PgRecommendationRepository::new(pool.clone())),
            reviews: Arc::new(PgReviewRepository::new(pool)),
        }
    }
}

/// Everything `main` needs to serve and shut down.
pub struct Services {
    pub composite: Router,
    pub product: Router,
    pub recommendation: Router,
    pub review: Router,
    /// Shared transport; shut it down after the servers stop.
    pub bus: Arc<PartitionedBus>,
}

/// Builds and wires every component.
///
/// # Errors
///
/// Returns `AppError::Transport` if a consumer cannot be subscribed and
/// `AppError::HttpClient` if the backend client cannot be built.
pub async fn build(config: &AppConfig, repositories: Repositories) -> Result<Services, AppError> {
    let bus = Arc::new(PartitionedBus::new(config.bus.clone()));
    bus.subscribe(
        PRODUCTS_CHANNEL,
        Arc::new(ProductEventConsumer::new(repositories.products.clone())),
    )
    .await?;
    bus.subscribe(
        RECOMMENDATIONS_CHANNEL,
        Arc::new(RecommendationEventConsumer::new(
            repositories.recommendations.clone(),
        )),
    )
    .await?;
    bus.subscribe(
        REVIEWS_CHANNEL,
        Arc::new(ReviewEventConsumer::new(repositories.reviews.clone())),
    )
    .await?;

    let http = reqwest::Client::builder()
        .timeout(config.backend_timeout)
        .build()?;
    let product_client = Arc::new(ProductHttpClient::new(
        http.clone(),
        &config.product_service_url,
    ));
    let recommendation_client = Arc::new(RecommendationHttpClient::new(
        http.clone(),
        &config.recommendation_service_url,
    ));
    let review_client = Arc::new(ReviewHttpClient::new(http, &config.review_service_url));

    let composite = CompositeState {
        aggregator: ReadAggregator::new(
            product_client.clone(),
            recommendation_client.clone(),
            review_client.clone(),
            ServiceAddress::new(&config.hostname, config.composite_port),
        ),
        writer: CompositeWriter::new(
            EventDispatcher::new(bus.clone()),
            Arc::new(SystemClock),
        ),
        health: HealthAggregator::new()
            .with_component("product", product_client)
            .with_component("recommendation", recommendation_client)
            .with_component("review", review_client),
    };

    info!(
        product = %config.product_service_url,
        recommendation = %config.recommendation_service_url,
        review = %config.review_service_url,
        "composite wired"
    );

    Ok(Services {
        composite: routes::composite_app(composite),
        product: routes::product_app(ProductState {
            repository: repositories.products,
            service_address: ServiceAddress::new(&config.hostname, config.product_port),
        }),
        recommendation: routes::recommendation_app(RecommendationState {
            repository: repositories.recommendations,
            service_address: ServiceAddress::new(&config.hostname, config.recommendation_port),
        }),
        review: routes::review_app(ReviewState {
            repository: repositories.reviews,
            service_address: ServiceAddress::new(&config.hostname, config.review_port),
        }),
        bus,
    })
}
