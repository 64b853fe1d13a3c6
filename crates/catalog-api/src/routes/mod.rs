//! Route modules, one per hosted service.

pub mod composite;
pub mod health;
pub mod product;
pub mod recommendation;
pub mod review;

use axum::Router;
use axum::middleware;
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::error_path;
use crate::state::{CompositeState, ProductState, RecommendationState, ReviewState};

/// Query string of the satellite list/delete endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductIdQuery {
    pub product_id: i32,
}

/// Full product service application.
pub fn product_app(state: ProductState) -> Router {
    finish(product::router().merge(health::router()), state)
}

/// Full recommendation service application.
pub fn recommendation_app(state: RecommendationState) -> Router {
    finish(recommendation::router().merge(health::router()), state)
}

/// Full review service application.
pub fn review_app(state: ReviewState) -> Router {
    finish(review::router().merge(health::router()), state)
}

/// Full composite service application.
pub fn composite_app(state: CompositeState) -> Router {
    finish(composite::router(), state)
}

// TODO: Replace CorsLayer::permissive() with restricted origins for production.
fn finish<S>(router: Router<S>, state: S) -> Router
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(middleware::from_fn(error_path))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
