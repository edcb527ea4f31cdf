use std::time::Duration;

use mandi::config::Config;
use mandi::AppState;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// How often expired cache entries are dropped.
const CACHE_PURGE_INTERVAL_SECS: u64 = 600;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mandi=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    config.forecast.validate()?;
    info!("Starting Mandi server on {}", config.bind_addr());

    if config.data_gov.api_key.is_none() {
        warn!("DATA_GOV_KEY is not set; forecast requests will fail until it is configured");
    }

    let state = AppState::new(config);

    // Periodically drop expired observations
    if state.observations.cache().is_enabled() {
        let observations = state.observations.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_secs(CACHE_PURGE_INTERVAL_SECS)).await;
                observations.cache().purge_expired();
            }
        });
    }

    let addr = state.config.bind_addr();
    let app = mandi::app(state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Mandi server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
