//! Clients for the three owning services.
//!
//! The aggregator only sees the backend traits; the reqwest clients below
//! are the production implementations.

use async_trait::async_trait;
use catalog_core::error::DomainError;
use catalog_product::domain::model::Product;
use catalog_recommendation::domain::model::Recommendation;
use catalog_review::domain::model::Review;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::error_translator::{translate_error_response, translate_transport_error};

/// Read access to the product service.
#[async_trait]
pub trait ProductBackend: Send + Sync {
    async fn get_product(&self, product_id: i32) -> Result<Product, DomainError>;
}

/// Read access to the recommendation service.
#[async_trait]
pub trait RecommendationBackend: Send + Sync {
    async fn get_recommendations(&self, product_id: i32)
    -> Result<Vec<Recommendation>, DomainError>;
}

/// Read access to the review service.
#[async_trait]
pub trait ReviewBackend: Send + Sync {
    async fn get_reviews(&self, product_id: i32) -> Result<Vec<Review>, DomainError>;
}

/// A component whose health the composite reports.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Succeeds if the component reports itself healthy.
    async fn check(&self) -> Result<(), DomainError>;
}

/// Base URL plus a shared connection pool.
#[derive(Debug, Clone)]
struct ServiceEndpoint {
    client: Client,
    base_url: String,
}

impl ServiceEndpoint {
    fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, i32)],
    ) -> Result<T, DomainError> {
        let url = format!("{}{path}", self.base_url);
        debug!(url, "calling backend");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| translate_transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(translate_error_response(status, &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| translate_transport_error(&e))
    }

    async fn probe(&self) -> Result<(), DomainError> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| translate_transport_error(&e))?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(DomainError::Upstream {
                status: Some(response.status().as_u16()),
                message: format!("health probe to {url} failed"),
            })
        }
    }
}

/// HTTP client for the product service.
#[derive(Debug, Clone)]
pub struct ProductHttpClient {
    endpoint: ServiceEndpoint,
}

impl ProductHttpClient {
    /// Creates a client for the product service at `base_url`.
    #[must_use]
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            endpoint: ServiceEndpoint::new(client, base_url),
        }
    }
}

#[async_trait]
impl ProductBackend for ProductHttpClient {
    #[instrument(skip(self))]
    async fn get_product(&self, product_id: i32) -> Result<Product, DomainError> {
        self.endpoint
            .get_json(&format!("/product/{product_id}"), &[])
            .await
    }
}

#[async_trait]
impl HealthProbe for ProductHttpClient {
    async fn check(&self) -> Result<(), DomainError> {
        self.endpoint.probe().await
    }
}

/// HTTP client for the recommendation service.
#[derive(Debug, Clone)]
pub struct RecommendationHttpClient {
    endpoint: ServiceEndpoint,
}

impl RecommendationHttpClient {
    #[must_use]
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            endpoint: ServiceEndpoint::new(client, base_url),
        }
    }
}

#[async_trait]
impl RecommendationBackend for RecommendationHttpClient {
    #[instrument(skip(self))]
    async fn get_recommendations(
        &self,
        product_id: i32,
    ) -> Result<Vec<Recommendation>, DomainError> {
        self.endpoint
            .get_json("/recommendation", &[("productId", product_id)])
            .await
    }
}

#[async_trait]
impl HealthProbe for RecommendationHttpClient {
    async fn check(&self) -> Result<(), DomainError> {
        self.endpoint.probe().await
    }
}

/// HTTP client for the review service.
#[derive(Debug, Clone)]
pub struct ReviewHttpClient {
    endpoint: ServiceEndpoint,
}

impl ReviewHttpClient {
    #[must_use]
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            endpoint: ServiceEndpoint::new(client, base_url),
        }
    }
}

#[async_trait]
impl ReviewBackend for ReviewHttpClient {
    #[instrument(skip(self))]
    async fn get_reviews(&self, product_id: i32) -> Result<Vec<Review>, DomainError> {
        self.endpoint
            .get_json("/review", &[("productId", product_id)])
            .await
    }
}

#[async_trait]
impl HealthProbe for ReviewHttpClient {
    async fn check(&self) -> Result<(), DomainError> {
        self.endpoint.probe().await
    }
}
