use std::env;

use crate::services::forecast::ForecastParams;

/// data.gov.in "Current daily price of various commodities from various markets (Mandi)".
pub const DEFAULT_RESOURCE_ID: &str = "9ef84268-d588-465a-a308-a864a43d0070";

/// Upstream data source configuration.
#[derive(Debug, Clone)]
pub struct DataGovConfig {
    /// API key for data.gov.in.
    pub api_key: Option<String>,
    /// Resource API base URL (without the resource ID).
    pub base_url: String,
    /// Resource ID of the daily mandi price dataset.
    pub resource_id: String,
    /// Maximum records requested per fetch.
    pub record_limit: usize,
    /// Upstream request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for DataGovConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.data.gov.in/resource".to_string(),
            resource_id: DEFAULT_RESOURCE_ID.to_string(),
            record_limit: 60,
            timeout_secs: 10,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Upstream data source.
    pub data_gov: DataGovConfig,
    /// How long fetched observations are reused (seconds, 0 = no caching).
    pub cache_ttl_secs: u64,
    /// Commodity used when a request does not name one.
    pub default_commodity: String,
    /// Default forecast parameters.
    pub forecast: ForecastParams,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            data_gov: DataGovConfig::default(),
            cache_ttl_secs: 300,
            default_commodity: "Onion".to_string(),
            forecast: ForecastParams::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any variable source, falling back to the
    /// defaults for unset or unparseable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let parse = |key: &str| lookup(key).map(|v| v.trim().to_string());

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_value(parse("PORT")).unwrap_or(defaults.port),
            data_gov: DataGovConfig {
                api_key: lookup("DATA_GOV_KEY").filter(|k| !k.trim().is_empty()),
                base_url: lookup("DATA_GOV_BASE_URL").unwrap_or(defaults.data_gov.base_url),
                resource_id: lookup("DATA_GOV_RESOURCE_ID")
                    .unwrap_or(defaults.data_gov.resource_id),
                record_limit: parse_value(parse("DATA_GOV_RECORD_LIMIT"))
                    .unwrap_or(defaults.data_gov.record_limit),
                timeout_secs: parse_value(parse("REQUEST_TIMEOUT_SECS"))
                    .unwrap_or(defaults.data_gov.timeout_secs),
            },
            cache_ttl_secs: parse_value(parse("CACHE_TTL_SECS")).unwrap_or(defaults.cache_ttl_secs),
            default_commodity: lookup("DEFAULT_COMMODITY").unwrap_or(defaults.default_commodity),
            forecast: ForecastParams {
                window_size: parse_value(parse("FORECAST_WINDOW"))
                    .unwrap_or(defaults.forecast.window_size),
                trend_window: parse_value(parse("FORECAST_TREND_WINDOW"))
                    .unwrap_or(defaults.forecast.trend_window),
                horizon: parse_value(parse("FORECAST_HORIZON"))
                    .unwrap_or(defaults.forecast.horizon),
            },
        }
    }

    /// Socket address string the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_value<T: std::str::FromStr>(value: Option<String>) -> Option<T> {
    value.and_then(|v| v.parse().ok())
}
