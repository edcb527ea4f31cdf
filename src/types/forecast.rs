use serde::Serialize;

use super::{CleanedObservation, ForecastPoint};

/// Direction of the short-window price trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Rising,
    Falling,
    Flat,
}

impl TrendDirection {
    /// Classify a regression slope by its sign.
    pub fn from_slope(slope: f64) -> Self {
        if slope > 0.0 {
            TrendDirection::Rising
        } else if slope < 0.0 {
            TrendDirection::Falling
        } else {
            TrendDirection::Flat
        }
    }

    /// Per-step multiplicative factor applied over the horizon.
    pub fn factor(&self) -> f64 {
        match self {
            TrendDirection::Rising => 1.01,
            TrendDirection::Falling => 0.99,
            TrendDirection::Flat => 1.0,
        }
    }
}

/// Hold/sell hint derived from the next forecast price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Advice {
    Hold {
        #[serde(rename = "changePct")]
        change_pct: f64,
    },
    Sell {
        #[serde(rename = "changePct")]
        change_pct: f64,
    },
    Stable,
}

impl Advice {
    /// User-facing message.
    pub fn message(&self) -> String {
        match self {
            Advice::Hold { change_pct } => {
                format!("Hold your crop, price may rise by {:.1}%!", change_pct)
            }
            Advice::Sell { change_pct } => {
                format!("Better to sell soon, price may drop by {:.1}%.", change_pct.abs())
            }
            Advice::Stable => "Prices look stable.".to_string(),
        }
    }
}

/// Advice as rendered in API responses.
#[derive(Debug, Clone, Serialize)]
pub struct AdviceView {
    #[serde(flatten)]
    pub advice: Advice,
    pub message: String,
}

impl From<Advice> for AdviceView {
    fn from(advice: Advice) -> Self {
        Self {
            message: advice.message(),
            advice,
        }
    }
}

/// Everything produced by one forecast run.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastOutcome {
    /// Cleaned, deduplicated, date-ordered history.
    pub historical: Vec<CleanedObservation>,
    /// Projected prices over the horizon.
    pub forecast: Vec<ForecastPoint>,
    /// Smoothed current price level the projection is anchored on.
    pub weighted_average: f64,
    /// Regression slope over the trend window.
    pub slope: f64,
    pub trend: TrendDirection,
}

/// Response body for `GET /api/forecast`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResponse {
    pub crop: String,
    pub historical: Vec<CleanedObservation>,
    pub forecast: Vec<ForecastPoint>,
    pub weighted_average: f64,
    pub trend: TrendDirection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advice: Option<AdviceView>,
}
