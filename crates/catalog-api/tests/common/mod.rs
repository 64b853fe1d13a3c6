//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use catalog_api::bootstrap::{self, Repositories};
use catalog_api::config::AppConfig;
use catalog_bus::PartitionedBus;
use http_body_util::BodyExt;
use tokio::net::TcpListener;
use tower::ServiceExt;

/// The four services wired as in `main`, with the owning services served
/// on ephemeral ports and the composite driven in-process.
pub struct TestSystem {
    pub composite: Router,
    pub bus: Arc<PartitionedBus>,
    pub repositories: Repositories,
}

/// Configuration with fast retries and every backend URL unset.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::from_lookup(&|_| None).unwrap();
    config.bus.retry_backoff = Duration::from_millis(1);
    config.backend_timeout = Duration::from_secs(2);
    config
}

async fn bind() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    (listener, url)
}

fn serve(listener: TcpListener, app: Router) {
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
}

/// URL of a port nobody listens on.
pub async fn unreachable_url() -> String {
    let (listener, url) = bind().await;
    drop(listener);
    url
}

/// Starts the whole system with in-memory stores.
pub async fn start_system() -> TestSystem {
    start_system_with(|_| {}).await
}

/// Starts the whole system after letting `adjust` rewrite the backend URLs.
pub async fn start_system_with(adjust: impl FnOnce(&mut AppConfig)) -> TestSystem {
    let (product_listener, product_url) = bind().await;
    let (recommendation_listener, recommendation_url) = bind().await;
    let (review_listener, review_url) = bind().await;

    let mut config = test_config();
    config.product_service_url = product_url;
    config.recommendation_service_url = recommendation_url;
    config.review_service_url = review_url;
    adjust(&mut config);

    let repositories = Repositories::in_memory();
    let services = bootstrap::build(&config, repositories.clone())
        .await
        .unwrap();

    serve(product_listener, services.product);
    serve(recommendation_listener, services.recommendation);
    serve(review_listener, services.review);

    TestSystem {
        composite: services.composite,
        bus: services.bus,
        repositories,
    }
}

/// Sends a request and returns the status and the JSON body (`Null` when
/// the body is empty).
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<&serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(json).unwrap())
        }
        None => Body::empty(),
    };

    let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, Method::GET, uri, None).await
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, Method::POST, uri, Some(body)).await
}

/// Send a DELETE request and return the status.
pub async fn delete(app: Router, uri: &str) -> StatusCode {
    send(app, Method::DELETE, uri, None).await.0
}

/// Polls `check` until it returns `true`, failing after five seconds.
pub async fn eventually<F, Fut>(mut check: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    for _ in 0..100 {
        if check().await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("condition not met within five seconds");
}
