//! HTTP server startup logic.

use std::time::Duration;

use axum::Router;
use axum_server::Handle;

use crate::config::HttpServerConfig;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address: {0}")]
    InvalidAddress(String),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Start the HTTP server on the configured address.
///
/// This function blocks until the server shuts down, either after a signal
/// has been received and connections have drained or on a bind/accept failure.
pub async fn start_server(app: Router, config: &HttpServerConfig) -> Result<(), ServerError> {
    let addr = config
        .socket_addr()
        .map_err(|e| ServerError::InvalidAddress(e.to_string()))?;

    let handle = Handle::new();

    shutdown::setup_shutdown_handler(
        handle.clone(),
        Duration::from_secs(config.shutdown_timeout_seconds),
    );
    log_when_listening(handle.clone());

    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

/// Log the bound address once the listener is up.
fn log_when_listening(handle: Handle) {
    tokio::spawn(async move {
        if let Some(addr) = handle.listening().await {
            tracing::info!("Listening on http://{}", addr);
        }
    });
}
