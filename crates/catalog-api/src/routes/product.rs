//! Routes of the product service.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post};
use tracing::{info, instrument};
use uuid::Uuid;

use catalog_product::application::{command_handlers, query_handlers};
use catalog_product::domain::commands;
use catalog_product::domain::model::Product;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::ProductState;

/// POST `/product`
#[instrument(skip(state, body), fields(product_id = body.product_id))]
async fn create_product(
    State(state): State<ProductState>,
    ApiJson(body): ApiJson<Product>,
) -> Result<Json<Product>, ApiError> {
    let command = commands::CreateProduct {
        correlation_id: Uuid::new_v4(),
        product: body,
    };

    info!(correlation_id = %command.correlation_id, "handling create_product command");

    let product =
        command_handlers::handle_create_product(&command, state.repository.as_ref()).await?;

    Ok(Json(product))
}

/// GET `/product/{product_id}`
#[instrument(skip(state))]
async fn get_product(
    State(state): State<ProductState>,
    ApiPath(product_id): ApiPath<i32>,
) -> Result<Json<Product>, ApiError> {
    let product = query_handlers::get_product(
        product_id,
        state.repository.as_ref(),
        &state.service_address,
    )
    .await?;

    Ok(Json(product))
}

/// DELETE `/product/{product_id}`
#[instrument(skip(state))]
async fn delete_product(
    State(state): State<ProductState>,
    ApiPath(product_id): ApiPath<i32>,
) -> Result<StatusCode, ApiError> {
    let command = commands::DeleteProduct {
        correlation_id: Uuid::new_v4(),
        product_id,
    };

    info!(correlation_id = %command.correlation_id, "handling delete_product command");

    command_handlers::handle_delete_product(&command, state.repository.as_ref()).await?;

    Ok(StatusCode::OK)
}

/// Returns the router for the product service.
pub fn router() -> Router<ProductState> {
    Router::new()
        .route("/product", post(create_product))
        .route(
            "/product/{product_id}",
            get(get_product).delete(delete_product),
        )
}
