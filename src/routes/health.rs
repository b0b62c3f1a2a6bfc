//! Health check endpoint for container orchestration.
//!
//! Provides a liveness probe that returns 200 OK whenever the process can answer
//! HTTP. Used by Kubernetes, ECS, systemd, and load balancers to verify the
//! service is alive.

use axum::Json;
use serde::Serialize;

pub const HEALTH_STATUS_OK: &str = "ok";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: HEALTH_STATUS_OK,
        }
    }
}

/// Health check handler.
///
/// This is a liveness probe only; there are no dependencies to check.
pub async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
