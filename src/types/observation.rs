use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date layouts accepted for observation dates, tried in order.
///
/// data.gov.in reports `arrival_date` as `dd/mm/yyyy`.
pub const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y"];

/// A price value as it arrives from a source: either a JSON number or text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Number(f64),
    Text(String),
}

impl RawPrice {
    /// Parse to a finite number.
    pub fn parse(&self) -> Option<f64> {
        let value = match self {
            RawPrice::Number(n) => *n,
            RawPrice::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for RawPrice {
    fn from(value: f64) -> Self {
        RawPrice::Number(value)
    }
}

impl From<&str> for RawPrice {
    fn from(value: &str) -> Self {
        RawPrice::Text(value.to_string())
    }
}

/// A single raw price observation for a commodity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    /// Date as received; not yet validated.
    pub date: String,
    /// Price as received; may be missing or non-numeric.
    pub price: Option<RawPrice>,
    /// Market/location label.
    pub market: Option<String>,
}

impl PriceObservation {
    pub fn new(date: impl Into<String>, price: Option<RawPrice>, market: Option<String>) -> Self {
        Self {
            date: date.into(),
            price,
            market,
        }
    }

    /// Parse the date against [`DATE_FORMATS`].
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

/// Parse a calendar date in any of the accepted layouts.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// A validated observation with a parsed date and a finite, non-negative price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanedObservation {
    /// Date label echoed from the input.
    pub date: String,
    #[serde(skip)]
    pub day: NaiveDate,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
}

/// A single projected price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastPoint {
    /// Relative horizon label (`+1`, `+2`, ...).
    #[serde(rename = "date")]
    pub label: String,
    pub price: u64,
}

impl ForecastPoint {
    /// Build the point for horizon step `step` (1-based).
    pub fn at_step(step: usize, price: u64) -> Self {
        Self {
            label: format!("+{}", step),
            price,
        }
    }
}
