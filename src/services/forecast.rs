//! Weighted-moving-average forecasting with a short-window trend.
//!
//! The pipeline is `clean -> smooth -> trend -> project`:
//! - raw observations are filtered, sorted by date and deduplicated
//! - the last `window_size` prices are averaged with a fixed position weight table
//! - an OLS slope over the last `trend_window` of those prices picks a per-step
//!   factor of 1.01, 0.99 or 1.00
//! - the average is compounded by that factor for each of `horizon` steps

use thiserror::Error;
use tracing::debug;

use crate::types::{CleanedObservation, ForecastOutcome, ForecastPoint, PriceObservation, TrendDirection};

/// Position weights for the smoothing window, oldest first.
pub const WEIGHTS: [f64; 7] = [0.10, 0.10, 0.15, 0.15, 0.20, 0.15, 0.15];

/// Weight for window positions past the end of [`WEIGHTS`].
pub const FALLBACK_WEIGHT: f64 = 0.10;

/// Largest accepted horizon.
pub const MAX_HORIZON: usize = 365;

/// Largest accepted observed price. Keeps every projection within `u64`
/// even when compounded at 1.01 over [`MAX_HORIZON`] steps.
pub const MAX_PRICE: f64 = 1e12;

/// Forecast engine errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    #[error("No usable price observations")]
    EmptyData,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Tunable forecast parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastParams {
    /// Number of trailing prices in the weighted average.
    pub window_size: usize,
    /// Number of trailing window prices used for the trend slope.
    pub trend_window: usize,
    /// Number of projected steps.
    pub horizon: usize,
}

impl Default for ForecastParams {
    fn default() -> Self {
        Self {
            window_size: 7,
            trend_window: 3,
            horizon: 7,
        }
    }
}

impl ForecastParams {
    pub fn validate(&self) -> Result<(), ForecastError> {
        if self.window_size == 0 {
            return Err(ForecastError::InvalidParameter(
                "window size must be at least 1".to_string(),
            ));
        }
        if self.horizon > MAX_HORIZON {
            return Err(ForecastError::InvalidParameter(format!(
                "horizon must be at most {}",
                MAX_HORIZON
            )));
        }
        Ok(())
    }
}

/// Stateless forecaster; one instance can serve any number of commodities.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForecastEngine {
    params: ForecastParams,
}

impl ForecastEngine {
    pub fn new(params: ForecastParams) -> Result<Self, ForecastError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Drop unusable records, sort by date and keep the first record per date.
    ///
    /// A record is unusable when its price is missing, non-numeric, non-finite,
    /// negative or above [`MAX_PRICE`], or when its date does not parse.
    pub fn clean(raw: &[PriceObservation]) -> Result<Vec<CleanedObservation>, ForecastError> {
        let mut cleaned: Vec<CleanedObservation> = raw
            .iter()
            .filter_map(|obs| {
                let price = obs.price.as_ref()?.parse()?;
                if !(0.0..=MAX_PRICE).contains(&price) {
                    return None;
                }
                let day = obs.parsed_date()?;
                Some(CleanedObservation {
                    date: obs.date.clone(),
                    day,
                    price,
                    market: obs.market.clone(),
                })
            })
            .collect();

        let usable = cleaned.len();

        // Stable sort keeps input order among equal dates, so dedup keeps the first seen.
        cleaned.sort_by_key(|obs| obs.day);
        cleaned.dedup_by_key(|obs| obs.day);

        debug!(
            "Cleaned {} raw observations: {} usable, {} unique dates",
            raw.len(),
            usable,
            cleaned.len()
        );

        if cleaned.is_empty() {
            return Err(ForecastError::EmptyData);
        }

        Ok(cleaned)
    }

    /// Project prices over the horizon from cleaned observations.
    pub fn forecast(&self, cleaned: &[CleanedObservation]) -> Result<Vec<ForecastPoint>, ForecastError> {
        Ok(self.project(cleaned)?.forecast)
    }

    /// Run `clean` then `forecast`, keeping the intermediate values.
    pub fn run(&self, raw: &[PriceObservation]) -> Result<ForecastOutcome, ForecastError> {
        let historical = Self::clean(raw)?;
        let projection = self.project(&historical)?;

        Ok(ForecastOutcome {
            historical,
            forecast: projection.forecast,
            weighted_average: projection.weighted_average,
            slope: projection.slope,
            trend: projection.trend,
        })
    }

    fn project(&self, cleaned: &[CleanedObservation]) -> Result<Projection, ForecastError> {
        let ForecastParams {
            window_size,
            trend_window,
            horizon,
        } = self.params;

        let start = cleaned.len().saturating_sub(window_size);
        let recent_prices: Vec<f64> = cleaned[start..].iter().map(|obs| obs.price).collect();

        let weighted_average = weighted_average(&recent_prices).ok_or(ForecastError::EmptyData)?;

        let trend_start = recent_prices.len().saturating_sub(trend_window);
        let slope = linear_slope(&recent_prices[trend_start..]);
        let trend = TrendDirection::from_slope(slope);

        let forecast = project_prices(weighted_average, trend.factor(), horizon)
            .into_iter()
            .enumerate()
            .map(|(i, price)| ForecastPoint::at_step(i + 1, price))
            .collect();

        Ok(Projection {
            forecast,
            weighted_average,
            slope,
            trend,
        })
    }
}

struct Projection {
    forecast: Vec<ForecastPoint>,
    weighted_average: f64,
    slope: f64,
    trend: TrendDirection,
}

/// Weighted mean of `prices` normalized by the weights actually used.
///
/// Returns `None` for an empty slice.
pub fn weighted_average(prices: &[f64]) -> Option<f64> {
    if prices.is_empty() {
        return None;
    }

    let (weighted_sum, weight_sum) = prices
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(sum, weights), (i, price)| {
            let weight = WEIGHTS.get(i).copied().unwrap_or(FALLBACK_WEIGHT);
            (sum + price * weight, weights + weight)
        });

    Some(weighted_sum / weight_sum)
}

/// Closed-form OLS slope of `values` against their zero-based index.
///
/// Fewer than two points, or a zero denominator, give a slope of 0.
pub fn linear_slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n <= 1 {
        return 0.0;
    }

    let (sum_x, sum_y, sum_xy, sum_x2) = values.iter().enumerate().fold(
        (0.0, 0.0, 0.0, 0.0),
        |(sx, sy, sxy, sx2), (i, &y)| {
            let x = i as f64;
            (sx + x, sy + y, sxy + x * y, sx2 + x * x)
        },
    );

    let n = n as f64;
    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator == 0.0 {
        return 0.0;
    }

    (n * sum_xy - sum_x * sum_y) / denominator
}

/// `round(max(0, base * factor^k))` for `k = 1..=horizon`.
pub fn project_prices(base: f64, factor: f64, horizon: usize) -> Vec<u64> {
    (1..=horizon)
        .map(|k| {
            let projected = base * factor.powi(k as i32);
            projected.max(0.0).round() as u64
        })
        .collect()
}
