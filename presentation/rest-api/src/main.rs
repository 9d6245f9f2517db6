use dotenvy::dotenv;

mod api;
mod config;
mod setup;

use config::app_config::AppConfig;
use setup::{dependency_injection::DependencyContainer, server::Server};

/// REST API Entry Point
///
/// Loads configuration, wires the shopping use cases to the configured
/// store and starts the HTTP server.
/// - config/: server, CORS, Firebase and storage settings
/// - setup/: dependency injection and server setup
/// - api/: route handlers, DTOs and authentication
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load environment variables (RUST_LOG may come from .env)
    dotenv().ok();

    // 2. Initialize tracing with RUST_LOG env filter
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // 3. Load configuration
    let config = AppConfig::from_env()?;

    // 4. Wire dependencies (connects the store and runs migrations)
    let container = DependencyContainer::new(&config).await?;

    // 5. Run server
    Server::run(config, container).await?;

    Ok(())
}
