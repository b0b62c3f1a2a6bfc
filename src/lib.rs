//! cicd-hello: a minimal JSON HTTP service.
//!
//! Serves a fixed greeting on `/` and a liveness probe on `/healthz`.

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;

pub use error::AppError;
pub use routes::create_router;
