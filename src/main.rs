//! Verity: a day-weighted random truth API.
//!
//! This is the application entry point. It parses command line arguments,
//! loads YAML configuration, initializes tracing, loads the truth content
//! set, builds the Axum router with all routes, and starts the HTTP server.
//! Startup errors are fatal: the process never serves with partial state.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use verity::config::{AppConfig, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER};
use verity::http;
use verity::routes::create_router;
use verity::state::AppState;
use verity::store::TruthStore;

/// Verity: a day-weighted random truth API
#[derive(Parser, Debug)]
#[command(name = "verity", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level filter (e.g., "verity=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration; schema or invariant violations abort startup
    let config = AppConfig::load(&args.config)?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(config = %args.config, "Loaded configuration");

    // Load the content set; a corrupt or empty file is fatal
    let store = TruthStore::load(&config.truths)?;
    tracing::info!(
        records = store.len(),
        file = %config.truths.file,
        "Loaded truth content"
    );

    tracing::info!(
        max_requests = config.rate_limit.max_requests,
        window_seconds = config.rate_limit.window_seconds,
        "Rate limiter configured"
    );

    // Create application state and router
    let state = AppState::new(config.clone(), store);
    let app = create_router(state);

    // Start server; blocks until SIGTERM/SIGINT
    http::start_server(app, &config).await?;

    Ok(())
}
