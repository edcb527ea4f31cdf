//! Mandi - commodity market-price forecasting server

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use services::ObservationService;
use sources::DataGovClient;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub observations: Arc<ObservationService>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let client = DataGovClient::new(config.data_gov.clone());
        let observations =
            ObservationService::new(client, Duration::from_secs(config.cache_ttl_secs));

        Self {
            config: Arc::new(config),
            observations,
        }
    }
}

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Re-export commonly used types
pub use services::{ForecastEngine, ForecastError, ForecastParams};
pub use types::*;
