use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Request-level failures. Only routing can fail.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("not found")]
    NotFound { path: String },

    #[error("method not allowed")]
    MethodNotAllowed { method: Method, path: String },
}

/// JSON body returned with every error status.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::NotFound { path } => {
                tracing::debug!(%path, "No route matched");
            }
            AppError::MethodNotAllowed { method, path } => {
                tracing::debug!(%method, %path, "Method not allowed for route");
            }
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
