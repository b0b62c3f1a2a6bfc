//! HTTP server module.
//!
//! Binds the router to the configured address over plain HTTP and drains
//! in-flight requests on SIGTERM/SIGINT before exiting.

mod server;
mod shutdown;

pub use server::{start_server, ServerError};
