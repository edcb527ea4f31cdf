//! data.gov.in resource API client for daily mandi prices.
//!
//! The feed returns loosely typed records (prices as strings, occasionally
//! missing). Records are mapped into [`PriceObservation`] here so nothing
//! downstream has to look at the raw JSON shape.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::DataGovConfig;
use crate::error::{AppError, Result};
use crate::types::{PriceObservation, RawPrice};

/// Resource API response envelope.
#[derive(Debug, Deserialize)]
struct ResourceResponse {
    records: Option<Vec<MandiRecord>>,
}

/// One market's report for one arrival date.
#[derive(Debug, Deserialize)]
struct MandiRecord {
    arrival_date: Option<String>,
    modal_price: Option<Value>,
    market: Option<String>,
}

impl MandiRecord {
    fn into_observation(self) -> PriceObservation {
        let price = match self.modal_price {
            Some(Value::Number(n)) => n.as_f64().map(RawPrice::Number),
            Some(Value::String(s)) => Some(RawPrice::Text(s)),
            _ => None,
        };

        PriceObservation {
            date: self.arrival_date.unwrap_or_default(),
            price,
            market: self.market,
        }
    }
}

/// data.gov.in REST client.
pub struct DataGovClient {
    client: Client,
    config: DataGovConfig,
}

impl DataGovClient {
    /// Create a new data.gov.in client.
    pub fn new(config: DataGovConfig) -> Self {
        let client = Client::builder()
            .user_agent("Mandi/0.1 (Commodity Price Forecaster)")
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, config }
    }

    fn resource_url(&self) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.resource_id
        )
    }

    /// Fetch raw price observations for a commodity.
    pub async fn fetch_observations(&self, commodity: &str) -> Result<Vec<PriceObservation>> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Config("API key not configured".to_string()))?;

        let limit = self.config.record_limit.to_string();

        info!("Fetching mandi prices for {}", commodity);

        let response = self
            .client
            .get(self.resource_url())
            .query(&[
                ("api-key", api_key),
                ("format", "json"),
                ("filters[commodity]", commodity),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            warn!("data.gov.in returned {} for {}", status, commodity);
            return Err(AppError::ExternalApi(format!("API request failed: {}", status)));
        }

        let body: ResourceResponse = response.json().await?;
        let records = body.records.unwrap_or_default();

        if records.is_empty() {
            return Err(AppError::NotFound(format!(
                "No data available for \"{}\". Try another crop.",
                commodity
            )));
        }

        debug!("Received {} records for {}", records.len(), commodity);

        Ok(records
            .into_iter()
            .map(MandiRecord::into_observation)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_mapping_string_price() {
        let record: MandiRecord = serde_json::from_value(serde_json::json!({
            "state": "Maharashtra",
            "market": "Lasalgaon",
            "commodity": "Onion",
            "arrival_date": "15/03/2024",
            "modal_price": "1850"
        }))
        .unwrap();

        let obs = record.into_observation();
        assert_eq!(obs.date, "15/03/2024");
        assert_eq!(obs.price, Some(RawPrice::Text("1850".to_string())));
        assert_eq!(obs.market.as_deref(), Some("Lasalgaon"));
    }

    #[test]
    fn test_record_mapping_numeric_price() {
        let record: MandiRecord = serde_json::from_value(serde_json::json!({
            "arrival_date": "15/03/2024",
            "modal_price": 1850
        }))
        .unwrap();

        assert_eq!(record.into_observation().price, Some(RawPrice::Number(1850.0)));
    }

    #[test]
    fn test_record_mapping_missing_fields() {
        let record: MandiRecord = serde_json::from_value(serde_json::json!({
            "modal_price": true
        }))
        .unwrap();

        let obs = record.into_observation();
        assert_eq!(obs.date, "");
        assert!(obs.price.is_none());
        assert!(obs.market.is_none());
    }

    #[test]
    fn test_response_without_records() {
        let body: ResourceResponse = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        assert!(body.records.is_none());

        let body: ResourceResponse = serde_json::from_str(r#"{"records":null}"#).unwrap();
        assert!(body.records.is_none());
    }

    #[test]
    fn test_resource_url_trims_slash() {
        let client = DataGovClient::new(DataGovConfig {
            base_url: "http://localhost:9000/resource/".to_string(),
            resource_id: "abc".to_string(),
            ..DataGovConfig::default()
        });

        assert_eq!(client.resource_url(), "http://localhost:9000/resource/abc");
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let client = DataGovClient::new(DataGovConfig::default());
        let err = client.fetch_observations("Onion").await.unwrap_err();

        assert!(matches!(err, AppError::Config(_)));
        assert_eq!(err.to_string(), "Configuration error: API key not configured");
    }
}
