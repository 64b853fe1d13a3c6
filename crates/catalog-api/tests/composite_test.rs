//! End-to-end tests: composite service, in-process transport and the three
//! owning services over HTTP.

mod common;

use axum::http::StatusCode;
use catalog_core::error::DomainError;
use serde_json::json;

#[tokio::test]
async fn test_created_product_becomes_readable_as_aggregate() {
    // Arrange
    let system = common::start_system().await;

    // Act
    let (status, accepted) = common::post_json(
        system.composite.clone(),
        "/product",
        &json!({ "productId": 1, "name": "n", "weight": 1 }),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(accepted["name"], "n");

    let app = system.composite.clone();
    common::eventually(|| {
        let app = app.clone();
        async move { common::get_json(app, "/product/1").await.0 == StatusCode::OK }
    })
    .await;

    let (_, aggregate) = common::get_json(system.composite.clone(), "/product/1").await;
    assert_eq!(aggregate["productId"], 1);
    assert_eq!(aggregate["name"], "n");
    assert_eq!(aggregate["weight"], 1);
    assert_eq!(aggregate["recommendations"], json!([]));
    assert_eq!(aggregate["reviews"], json!([]));
    assert_eq!(aggregate["serviceAddresses"]["cmp"], "localhost:7000");
    assert_eq!(aggregate["serviceAddresses"]["pro"], "localhost:7001");
    assert_eq!(aggregate["serviceAddresses"]["rec"], "");
    assert_eq!(aggregate["serviceAddresses"]["rev"], "");
}

#[tokio::test]
async fn test_unknown_product_aggregate_returns_404() {
    let system = common::start_system().await;

    let (status, json) = common::get_json(system.composite, "/product/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "No product found for productId: 999");
    assert_eq!(json["path"], "/product/999");
}

#[tokio::test]
async fn test_aggregate_carries_satellite_summaries() {
    // Arrange
    let system = common::start_system().await;
    let app = system.composite.clone();
    common::post_json(
        app.clone(),
        "/product",
        &json!({ "productId": 2, "name": "p", "weight": 3 }),
    )
    .await;
    common::post_json(
        app.clone(),
        "/recommendation",
        &json!({
            "productId": 2, "recommendationId": 1, "author": "a", "rate": 4, "content": "c"
        }),
    )
    .await;
    common::post_json(
        app.clone(),
        "/review",
        &json!({
            "productId": 2, "reviewId": 1, "author": "r", "subject": "s", "content": "c"
        }),
    )
    .await;

    // Act
    let probe = app.clone();
    common::eventually(|| {
        let app = probe.clone();
        async move {
            let (status, json) = common::get_json(app, "/product/2").await;
            status == StatusCode::OK
                && json["recommendations"].as_array().is_some_and(|a| a.len() == 1)
                && json["reviews"].as_array().is_some_and(|a| a.len() == 1)
        }
    })
    .await;
    let (_, aggregate) = common::get_json(app, "/product/2").await;

    // Assert
    assert_eq!(
        aggregate["recommendations"][0],
        json!({ "recommendationId": 1, "author": "a", "rate": 4 })
    );
    assert_eq!(
        aggregate["reviews"][0],
        json!({ "reviewId": 1, "author": "r", "subject": "s" })
    );
    assert_eq!(aggregate["serviceAddresses"]["rec"], "localhost:7002");
    assert_eq!(aggregate["serviceAddresses"]["rev"], "localhost:7003");
}

#[tokio::test]
async fn test_delete_product_removes_all_three_families() {
    // Arrange
    let system = common::start_system().await;
    let app = system.composite.clone();
    common::post_json(
        app.clone(),
        "/product",
        &json!({ "productId": 5, "name": "p", "weight": 1 }),
    )
    .await;
    common::post_json(
        app.clone(),
        "/review",
        &json!({
            "productId": 5, "reviewId": 1, "author": "r", "subject": "s", "content": "c"
        }),
    )
    .await;
    let repositories = system.repositories.clone();
    common::eventually(|| {
        let repositories = repositories.clone();
        async move {
            repositories
                .reviews
                .find_by_product_id(5)
                .await
                .is_ok_and(|r| r.len() == 1)
        }
    })
    .await;

    // Act
    let status = common::delete(app.clone(), "/product/5").await;

    // Assert
    assert_eq!(status, StatusCode::ACCEPTED);
    common::eventually(|| {
        let repositories = repositories.clone();
        async move {
            repositories
                .products
                .find_by_product_id(5)
                .await
                .is_ok_and(|p| p.is_none())
                && repositories
                    .reviews
                    .find_by_product_id(5)
                    .await
                    .is_ok_and(|r| r.is_empty())
        }
    })
    .await;
}

#[tokio::test]
async fn test_redelivered_create_is_dead_lettered_as_duplicate() {
    // Arrange
    let system = common::start_system().await;
    let body = json!({ "productId": 7, "name": "p", "weight": 1 });

    // Act
    let (first, _) = common::post_json(system.composite.clone(), "/product", &body).await;
    let (second, _) = common::post_json(system.composite.clone(), "/product", &body).await;
    system.bus.shutdown().await;

    // Assert
    assert_eq!(first, StatusCode::ACCEPTED);
    assert_eq!(second, StatusCode::ACCEPTED);
    let dead = system.bus.dead_letters().await;
    assert_eq!(dead.len(), 1);
    assert_eq!(dead[0].channel, "products");
    assert_eq!(dead[0].attempts, 1);
    assert_eq!(
        dead[0].error,
        DomainError::InvalidInput("Duplicate key, Product Id: 7".into())
    );
}

#[tokio::test]
async fn test_write_after_transport_shutdown_returns_503() {
    let system = common::start_system().await;
    system.bus.shutdown().await;

    let (status, json) = common::post_json(
        system.composite,
        "/product",
        &json!({ "productId": 1, "name": "n", "weight": 1 }),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["status"], 503);
}

#[tokio::test]
async fn test_aggregate_survives_unreachable_satellites() {
    // Arrange
    let recommendation_url = common::unreachable_url().await;
    let review_url = common::unreachable_url().await;
    let system = common::start_system_with(move |config| {
        config.recommendation_service_url = recommendation_url;
        config.review_service_url = review_url;
    })
    .await;
    common::post_json(
        system.composite.clone(),
        "/product",
        &json!({ "productId": 1, "name": "n", "weight": 1 }),
    )
    .await;

    // Act
    let app = system.composite.clone();
    common::eventually(|| {
        let app = app.clone();
        async move { common::get_json(app, "/product/1").await.0 == StatusCode::OK }
    })
    .await;
    let (_, aggregate) = common::get_json(system.composite.clone(), "/product/1").await;

    // Assert
    assert_eq!(aggregate["recommendations"], json!([]));
    assert_eq!(aggregate["reviews"], json!([]));

    let (status, _) =
        common::get_json(system.composite.clone(), "/recommendation?productId=1").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let (status, health) = common::get_json(system.composite, "/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(health["status"], "DOWN");
    assert_eq!(health["components"]["product"], "UP");
    assert_eq!(health["components"]["recommendation"], "DOWN");
    assert_eq!(health["components"]["review"], "DOWN");
}

#[tokio::test]
async fn test_health_is_up_when_all_backends_answer() {
    let system = common::start_system().await;

    let (status, health) = common::get_json(system.composite, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        health,
        json!({
            "status": "UP",
            "components": { "product": "UP", "recommendation": "UP", "review": "UP" }
        })
    );
}

#[tokio::test]
async fn test_pass_through_translates_backend_validation_error() {
    let system = common::start_system().await;

    let (status, json) = common::get_json(system.composite, "/review?productId=0").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["message"], "Invalid productId: 0");
    assert_eq!(json["path"], "/review");
}
