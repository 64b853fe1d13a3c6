//! Read-side view returned by the composite service.

use catalog_recommendation::domain::model::Recommendation;
use catalog_review::domain::model::Review;
use serde::{Deserialize, Serialize};

/// Product joined with its recommendation and review summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAggregate {
    pub product_id: i32,
    pub name: String,
    pub weight: i32,
    pub recommendations: Vec<RecommendationSummary>,
    pub reviews: Vec<ReviewSummary>,
    pub service_addresses: ServiceAddresses,
}

/// Projection of a recommendation without content or service address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationSummary {
    pub recommendation_id: i32,
    pub author: String,
    pub rate: i32,
}

impl From<Recommendation> for RecommendationSummary {
    fn from(r: Recommendation) -> Self {
        Self {
            recommendation_id: r.recommendation_id,
            author: r.author,
            rate: r.rate,
        }
    }
}

/// Projection of a review without content or service address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub review_id: i32,
    pub author: String,
    pub subject: String,
}

impl From<Review> for ReviewSummary {
    fn from(r: Review) -> Self {
        Self {
            review_id: r.review_id,
            author: r.author,
            subject: r.subject,
        }
    }
}

/// Instances that answered one aggregate request.
///
/// `rec` and `rev` come from the first element of each collection and are
/// empty when the collection is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAddresses {
    pub cmp: String,
    pub pro: String,
    pub rev: String,
    pub rec: String,
}
