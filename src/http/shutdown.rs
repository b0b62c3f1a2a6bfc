//! Graceful shutdown and signal handling.
//!
//! SIGTERM and SIGINT stop the listener and drain open connections.

use std::time::Duration;

use axum_server::Handle;

/// Setup graceful shutdown on SIGTERM and SIGINT.
///
/// When either signal is received, the server will:
/// 1. Stop accepting new connections
/// 2. Wait up to `grace_period` for existing connections to complete
/// 3. Shutdown
pub fn setup_shutdown_handler(handle: Handle, grace_period: Duration) {
    tokio::spawn(async move {
        let signal = shutdown_signal().await;
        tracing::info!(signal, "Received shutdown signal, initiating graceful shutdown");

        handle.graceful_shutdown(Some(grace_period));
        tracing::info!(
            grace_period_secs = grace_period.as_secs(),
            "Graceful shutdown initiated, waiting for connections to close"
        );
    });
}

/// Wait for the first of SIGINT or SIGTERM and return its name.
///
/// A signal whose handler cannot be installed is logged and never fires.
async fn shutdown_signal() -> &'static str {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => "SIGINT",
        _ = terminate => "SIGTERM",
    }
}
