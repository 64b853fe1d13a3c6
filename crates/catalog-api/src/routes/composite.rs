//! Routes of the composite service.
//!
//! Reads are answered from the owning services; writes are turned into
//! events and answered with `202 Accepted` before they are applied.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post};
use tracing::{info, instrument};

use catalog_composite::health::{CompositeHealth, HealthStatus};
use catalog_composite::model::ProductAggregate;
use catalog_product::domain::model::Product;
use catalog_recommendation::domain::model::Recommendation;
use catalog_review::domain::model::Review;

use super::ProductIdQuery;
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::CompositeState;

/// GET `/product/{product_id}`
#[instrument(skip(state))]
async fn get_product_aggregate(
    State(state): State<CompositeState>,
    ApiPath(product_id): ApiPath<i32>,
) -> Result<Json<ProductAggregate>, ApiError> {
    let aggregate = state.aggregator.get_aggregate(product_id).await?;
    Ok(Json(aggregate))
}

/// POST `/product`
#[instrument(skip(state, body), fields(product_id = body.product_id))]
async fn create_product(
    State(state): State<CompositeState>,
    ApiJson(body): ApiJson<Product>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = state.writer.create_product(body).await?;
    info!("product create accepted");
    Ok((StatusCode::ACCEPTED, Json(product)))
}

/// DELETE `/product/{product_id}`
#[instrument(skip(state))]
async fn delete_product(
    State(state): State<CompositeState>,
    ApiPath(product_id): ApiPath<i32>,
) -> Result<StatusCode, ApiError> {
    state.writer.delete_product_aggregate(product_id).await?;
    Ok(StatusCode::ACCEPTED)
}

/// GET `/recommendation?productId=`
#[instrument(skip(state, query), fields(product_id = query.product_id))]
async fn get_recommendations(
    State(state): State<CompositeState>,
    ApiQuery(query): ApiQuery<ProductIdQuery>,
) -> Result<Json<Vec<Recommendation>>, ApiError> {
    Ok(Json(
        state.aggregator.recommendations(query.product_id).await?,
    ))
}

/// POST `/recommendation`
#[instrument(skip(state, body), fields(product_id = body.product_id))]
async fn create_recommendation(
    State(state): State<CompositeState>,
    ApiJson(body): ApiJson<Recommendation>,
) -> Result<(StatusCode, Json<Recommendation>), ApiError> {
    let recommendation = state.writer.create_recommendation(body).await?;
    Ok((StatusCode::ACCEPTED, Json(recommendation)))
}

/// DELETE `/recommendation?productId=`
#[instrument(skip(state, query), fields(product_id = query.product_id))]
async fn delete_recommendations(
    State(state): State<CompositeState>,
    ApiQuery(query): ApiQuery<ProductIdQuery>,
) -> Result<StatusCode, ApiError> {
    state.writer.delete_recommendations(query.product_id).await?;
    Ok(StatusCode::ACCEPTED)
}

/// GET `/review?productId=`
#[instrument(skip(state, query), fields(product_id = query.product_id))]
async fn get_reviews(
    State(state): State<CompositeState>,
    ApiQuery(query): ApiQuery<ProductIdQuery>,
) -> Result<Json<Vec<Review>>, ApiError> {
    Ok(Json(state.aggregator.reviews(query.product_id).await?))
}

/// POST `/review`
#[instrument(skip(state, body), fields(product_id = body.product_id))]
async fn create_review(
    State(state): State<CompositeState>,
    ApiJson(body): ApiJson<Review>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    let review = state.writer.create_review(body).await?;
    Ok((StatusCode::ACCEPTED, Json(review)))
}

/// DELETE `/review?productId=`
#[instrument(skip(state, query), fields(product_id = query.product_id))]
async fn delete_reviews(
    State(state): State<CompositeState>,
    ApiQuery(query): ApiQuery<ProductIdQuery>,
) -> Result<StatusCode, ApiError> {
    state.writer.delete_reviews(query.product_id).await?;
    Ok(StatusCode::ACCEPTED)
}

/// GET `/health`
async fn composite_health(
    State(state): State<CompositeState>,
) -> (StatusCode, Json<CompositeHealth>) {
    let health = state.health.check().await;
    let status = match health.status {
        HealthStatus::Up => StatusCode::OK,
        HealthStatus::Down => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, Json(health))
}

/// Returns the router for the composite service.
pub fn router() -> Router<CompositeState> {
    Router::new()
        .route("/product", post(create_product))
        .route(
            "/product/{product_id}",
            get(get_product_aggregate).delete(delete_product),
        )
        .route(
            "/recommendation",
            get(get_recommendations)
                .post(create_recommendation)
                .delete(delete_recommendations),
        )
        .route(
            "/review",
            get(get_reviews).post(create_review).delete(delete_reviews),
        )
        .route("/health", get(composite_health))
}
