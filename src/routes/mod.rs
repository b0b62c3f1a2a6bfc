//! HTTP route handlers.
//!
//! Two fixed JSON endpoints: `/` for the greeting and `/healthz` for liveness.
//! Unmatched paths and methods fail closed with a JSON 404 or 405.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.

pub mod health;
pub mod home;

use axum::{
    http::{Method, Uri},
    middleware,
    routing::get,
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_NO_STORE;
use crate::error::AppError;
use crate::middleware::request_id_layer;

/// Fallback for paths with no route.
async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound {
        path: uri.path().to_string(),
    }
}

/// Fallback for known paths requested with an unsupported method.
async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::MethodNotAllowed {
        method,
        path: uri.path().to_string(),
    }
}

/// Creates the Axum router with all routes, fallbacks and middleware.
pub fn create_router() -> Router {
    let home_routes = Router::new().route("/", get(home::index));

    // Health check - no caching, always fresh for liveness probes
    let health_routes = Router::new().route("/healthz", get(health::healthz)).layer(
        SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_NO_STORE),
        ),
    );

    Router::new()
        .merge(home_routes)
        .merge(health_routes)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
