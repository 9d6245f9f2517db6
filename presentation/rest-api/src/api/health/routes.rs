use chrono::Utc;
use poem_openapi::{Object, OpenApi, payload::Json};
use serde::{Deserialize, Serialize};

use crate::api::tags::ApiTags;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct HealthCheckResponse {
    /// Service status
    pub status: String,
    /// Current server timestamp
    pub timestamp: String,
    /// Service version
    pub version: String,
    /// Shopping store backend ("postgres" or "memory")
    pub storage: String,
}

/// Health API for liveness probes and monitoring.
pub struct Api {
    storage: &'static str,
}

impl Api {
    pub fn new(storage: &'static str) -> Self {
        Self { storage }
    }
}

#[OpenApi]
impl Api {
    /// Health check endpoint
    ///
    /// Public, no authentication. Reports which shopping store is active.
    #[oai(path = "/health", method = "get", tag = "ApiTags::Health")]
    async fn health_check(&self) -> Json<HealthCheckResponse> {
        Json(HealthCheckResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            storage: self.storage.to_string(),
        })
    }
}
