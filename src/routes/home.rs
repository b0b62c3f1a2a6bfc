//! Root greeting endpoint.

use axum::Json;
use serde::Serialize;

pub const GREETING_MESSAGE: &str = "Hello from CI/CD!";

#[derive(Debug, Serialize)]
pub struct GreetingResponse {
    pub message: &'static str,
}

impl Default for GreetingResponse {
    fn default() -> Self {
        Self {
            message: GREETING_MESSAGE,
        }
    }
}

pub async fn index() -> Json<GreetingResponse> {
    Json(GreetingResponse::default())
}
