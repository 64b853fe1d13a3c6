//! Routes of the recommendation service.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::get};
use tracing::{info, instrument};
use uuid::Uuid;

use catalog_recommendation::application::{command_handlers, query_handlers};
use catalog_recommendation::domain::commands;
use catalog_recommendation::domain::model::Recommendation;

use super::ProductIdQuery;
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiQuery};
use crate::state::RecommendationState;

/// POST `/recommendation`
#[instrument(
    skip(state, body),
    fields(product_id = body.product_id, recommendation_id = body.recommendation_id)
)]
async fn create_recommendation(
    State(state): State<RecommendationState>,
    ApiJson(body): ApiJson<Recommendation>,
) -> Result<Json<Recommendation>, ApiError> {
    let command = commands::CreateRecommendation {
        correlation_id: Uuid::new_v4(),
        recommendation: body,
    };

    info!(correlation_id = %command.correlation_id, "handling create_recommendation command");

    let recommendation =
        command_handlers::handle_create_recommendation(&command, state.repository.as_ref())
            .await?;

    Ok(Json(recommendation))
}

/// GET `/recommendation?productId=`
#[instrument(skip(state, query), fields(product_id = query.product_id))]
async fn get_recommendations(
    State(state): State<RecommendationState>,
    ApiQuery(query): ApiQuery<ProductIdQuery>,
) -> Result<Json<Vec<Recommendation>>, ApiError> {
    let recommendations = query_handlers::get_recommendations(
        query.product_id,
        state.repository.as_ref(),
        &state.service_address,
    )
    .await?;

    Ok(Json(recommendations))
}

/// DELETE `/recommendation?productId=`
#[instrument(skip(state, query), fields(product_id = query.product_id))]
async fn delete_recommendations(
    State(state): State<RecommendationState>,
    ApiQuery(query): ApiQuery<ProductIdQuery>,
) -> Result<StatusCode, ApiError> {
    let command = commands::DeleteRecommendations {
        correlation_id: Uuid::new_v4(),
        product_id: query.product_id,
    };

    info!(correlation_id = %command.correlation_id, "handling delete_recommendations command");

    command_handlers::handle_delete_recommendations(&command, state.repository.as_ref()).await?;

    Ok(StatusCode::OK)
}

/// Returns the router for the recommendation service.
pub fn router() -> Router<RecommendationState> {
    Router::new().route(
        "/recommendation",
        get(get_recommendations)
            .post(create_recommendation)
            .delete(delete_recommendations),
    )
}
