pub mod commodities;
pub mod forecast;
pub mod health;

use crate::AppState;
use axum::Router;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(forecast::router())
        .merge(commodities::router())
}
