//! Pulse: a minimal JSON HTTP service.
//!
//! This is the application entry point. It captures the process start time,
//! initializes tracing, loads optional configuration, builds the Axum router
//! and serves it until a shutdown signal arrives.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pulse::config::{LoggingConfig, DEFAULT_LOG_FILTER};
use pulse::http::start_server;
use pulse::{create_router, AppConfig, AppState, ProcessClock};

/// Pulse: health, uptime and payload endpoints over JSON
#[derive(Parser, Debug)]
#[command(name = "pulse", version, about)]
struct Args {
    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Port to listen on (overrides http.port)
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level filter (e.g., "pulse=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

fn init_tracing(filter: &str, logging: &LoggingConfig) {
    let registry = tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(filter));

    if logging.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Uptime counts from here
    let clock = ProcessClock::start();

    let args = Args::parse();

    let mut config = AppConfig::load_or_default(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.http.port = port;
        config.validate()?;
    }

    // Priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    init_tracing(&log_filter, &config.logging);

    tracing::info!(
        config = args.config.as_deref().unwrap_or("<defaults>"),
        host = %config.http.host,
        port = config.http.port,
        body_limit_bytes = config.http.body_limit_bytes,
        "Loaded configuration"
    );

    let state = AppState::new(config.clone(), clock);
    let app = create_router(state);

    start_server(app, &config).await?;

    Ok(())
}
