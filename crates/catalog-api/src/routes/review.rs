//! Routes of the review service.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::get};
use tracing::{info, instrument};
use uuid::Uuid;

use catalog_review::application::{command_handlers, query_handlers};
use catalog_review::domain::commands;
use catalog_review::domain::model::Review;

use super::ProductIdQuery;
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiQuery};
use crate::state::ReviewState;

/// POST `/review`
#[instrument(skip(state, body), fields(product_id = body.product_id, review_id = body.review_id))]
async fn create_review(
    State(state): State<ReviewState>,
    ApiJson(body): ApiJson<Review>,
) -> Result<Json<Review>, ApiError> {
    let command = commands::CreateReview {
        correlation_id: Uuid::new_v4(),
        review: body,
    };

    info!(correlation_id = %command.correlation_id, "handling create_review command");

    let review = command_handlers::handle_create_review(&command, state.repository.as_ref()).await?;

    Ok(Json(review))
}

/// GET `/review?productId=`
#[instrument(skip(state, query), fields(product_id = query.product_id))]
async fn get_reviews(
    State(state): State<ReviewState>,
    ApiQuery(query): ApiQuery<ProductIdQuery>,
) -> Result<Json<Vec<Review>>, ApiError> {
    let reviews = query_handlers::get_reviews(
        query.product_id,
        state.repository.as_ref(),
        &state.service_address,
    )
    .await?;

    Ok(Json(reviews))
}

/// DELETE `/review?productId=`
#[instrument(skip(state, query), fields(product_id = query.product_id))]
async fn delete_reviews(
    State(state): State<ReviewState>,
    ApiQuery(query): ApiQuery<ProductIdQuery>,
) -> Result<StatusCode, ApiError> {
    let command = commands::DeleteReviews {
        correlation_id: Uuid::new_v4(),
        product_id: query.product_id,
    };

    info!(correlation_id = %command.correlation_id, "handling delete_reviews command");

    command_handlers::handle_delete_reviews(&command, state.repository.as_ref()).await?;

    Ok(StatusCode::OK)
}

/// Returns the router for the review service.
pub fn router() -> Router<ReviewState> {
    Router::new().route(
        "/review",
        get(get_reviews).post(create_review).delete(delete_reviews),
    )
}
