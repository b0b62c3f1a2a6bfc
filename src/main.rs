//! cicd-hello: a minimal JSON HTTP service.
//!
//! This is the application entry point. It resolves configuration from the TOML
//! file, environment and CLI flags, initializes tracing, builds the Axum router
//! and runs the HTTP server until a shutdown signal arrives.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cicd_hello::config::{AppConfig, ConfigOverrides, LogFormat, DEFAULT_LOG_FILTER};
use cicd_hello::create_router;
use cicd_hello::http::start_server;

/// cicd-hello: a JSON greeting and health-check HTTP service
#[derive(Parser, Debug)]
#[command(name = "cicd-hello", version, about)]
struct Args {
    /// Path to configuration file [default: config/default.toml, if present]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// IP address to listen on (overrides http.host)
    #[arg(long, env = "HTTP_HOST")]
    host: Option<String>,

    /// Port to listen on (overrides http.port)
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Log level filter (e.g., "cicd_hello=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Log output format (overrides logging.format)
    #[arg(long, env = "LOG_FORMAT", value_enum)]
    log_format: Option<LogFormat>,
}

fn init_tracing(filter: &str, format: LogFormat) {
    let registry = tracing_subscriber::registry().with(EnvFilter::new(filter));

    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration, then layer CLI/env values on top
    let mut config = AppConfig::resolve(args.config.as_deref())?;
    config.apply_overrides(ConfigOverrides {
        host: args.host,
        port: args.port,
        log_format: args.log_format,
    })?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    init_tracing(&log_filter, config.logging.format);

    match &config.source {
        Some(path) => tracing::info!(path = %path.display(), "Loaded configuration"),
        None => tracing::info!("No configuration file found, using defaults"),
    }

    let app = create_router();

    start_server(app, &config.http).await?;

    Ok(())
}
