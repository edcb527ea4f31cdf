//! Forecast API endpoint.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

use crate::error::{AppError, Result};
use crate::services::{advise_outcome, ForecastEngine, ForecastError, ForecastParams};
use crate::types::{AdviceView, ForecastResponse};
use crate::AppState;

/// Query parameters for the forecast endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastQuery {
    /// Commodity name, e.g. "Onion".
    pub crop: Option<String>,
    /// Smoothing window override.
    pub window: Option<usize>,
    /// Trend window override.
    pub trend_window: Option<usize>,
    /// Horizon override.
    pub horizon: Option<usize>,
}

impl ForecastQuery {
    /// Requested commodity, or `default` when absent or blank.
    pub fn crop_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.crop
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(default)
    }

    /// Overrides applied on top of the configured parameters.
    pub fn params(&self, defaults: &ForecastParams) -> ForecastParams {
        ForecastParams {
            window_size: self.window.unwrap_or(defaults.window_size),
            trend_window: self.trend_window.unwrap_or(defaults.trend_window),
            horizon: self.horizon.unwrap_or(defaults.horizon),
        }
    }
}

/// Create the forecast router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/forecast", get(get_forecast))
}

/// GET /api/forecast?crop=Onion
async fn get_forecast(
    State(state): State<AppState>,
    query: std::result::Result<Query<ForecastQuery>, QueryRejection>,
) -> Result<Json<ForecastResponse>> {
    let Query(query) = query?;
    let crop = query.crop_or(&state.config.default_commodity).to_string();

    // Reject bad overrides before touching the network.
    let engine = ForecastEngine::new(query.params(&state.config.forecast))?;

    let raw = state.observations.observations(&crop).await?;

    let outcome = engine.run(&raw).map_err(|e| match e {
        ForecastError::EmptyData => {
            AppError::NotFound(format!("No valid price data for \"{}\".", crop))
        }
        other => other.into(),
    })?;

    info!(
        "Forecast for {}: {} historical points, trend {:?}, level {:.2}",
        crop,
        outcome.historical.len(),
        outcome.trend,
        outcome.weighted_average
    );

    let advice = advise_outcome(&outcome).map(AdviceView::from);

    Ok(Json(ForecastResponse {
        crop,
        historical: outcome.historical,
        forecast: outcome.forecast,
        weighted_average: outcome.weighted_average,
        trend: outcome.trend,
        advice,
    }))
}
