use chrono::Utc;
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::types::dto::common::HealthResponse;

/// Health check API endpoints
pub struct HealthApi;

#[derive(Tags)]
enum HealthTags {
    /// Service health endpoints
    Health,
}

#[OpenApi]
impl HealthApi {
    /// Health check endpoint
    #[oai(path = "/health", method = "get", tag = "HealthTags::Health")]
    async fn health(&self) -> Json<HealthResponse> {
        Json(HealthResponse {
            status: "ok".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        })
    }
}
