//! Alpha Vantage API client for daily stock history.
//!
//! Uses the `TIME_SERIES_DAILY_ADJUSTED` endpoint. The free tier is heavily
//! rate limited (25 requests/day, 5/minute) and reports throttling inside a
//! 200 response, so the body is inspected before any bar is parsed.

use super::{PriceProvider, ProviderError};
use crate::types::PriceBar;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

pub const ALPHA_VANTAGE_URL: &str = "https://www.alphavantage.co/query";

/// Daily adjusted time series response.
///
/// Error and throttle notices arrive as alternative top-level keys.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyAdjustedResponse {
    #[serde(rename = "Error Message")]
    pub error_message: Option<String>,
    #[serde(rename = "Note")]
    pub note: Option<String>,
    #[serde(rename = "Information")]
    pub information: Option<String>,
    #[serde(rename = "Meta Data")]
    pub meta_data: Option<TimeSeriesMetaData>,
    #[serde(rename = "Time Series (Daily)")]
    pub time_series: Option<HashMap<String, DailyDataPoint>>,
}

/// Time series meta data.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeSeriesMetaData {
    #[serde(rename = "1. Information")]
    pub information: Option<String>,
    #[serde(rename = "2. Symbol")]
    pub symbol: Option<String>,
    #[serde(rename = "3. Last Refreshed")]
    pub last_refreshed: Option<String>,
}

/// One day of the series. Values are strings on the wire.
///
/// The adjusted endpoint numbers volume `6.`, the plain daily one `5.`.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyDataPoint {
    #[serde(rename = "1. open")]
    pub open: String,
    #[serde(rename = "2. high")]
    pub high: String,
    #[serde(rename = "3. low")]
    pub low: String,
    #[serde(rename = "4. close")]
    pub close: String,
    #[serde(rename = "5. adjusted close")]
    pub adjusted_close: Option<String>,
    #[serde(rename = "6. volume")]
    pub volume: Option<String>,
    #[serde(rename = "5. volume")]
    pub unadjusted_volume: Option<String>,
}

impl DailyDataPoint {
    fn to_bar(&self, date: NaiveDate) -> Result<PriceBar, ProviderError> {
        let adj_close = self
            .adjusted_close
            .as_deref()
            .map(|v| parse_number("5. adjusted close", v))
            .transpose()?;
        let volume = self
            .volume
            .as_deref()
            .or(self.unadjusted_volume.as_deref())
            .map(parse_volume)
            .transpose()?;

        Ok(PriceBar::new(
            date,
            parse_number("1. open", &self.open)?,
            parse_number("2. high", &self.high)?,
            parse_number("3. low", &self.low)?,
            parse_number("4. close", &self.close)?,
            adj_close,
            volume,
        ))
    }
}

fn parse_number(field: &str, value: &str) -> Result<f64, ProviderError> {
    value
        .trim()
        .parse()
        .map_err(|_| ProviderError::Parse(format!("invalid {} value {:?}", field, value)))
}

fn parse_volume(value: &str) -> Result<u64, ProviderError> {
    value
        .trim()
        .parse()
        .map_err(|_| ProviderError::Parse(format!("invalid volume value {:?}", value)))
}

/// Parse a `TIME_SERIES_DAILY_ADJUSTED` body into ascending bars.
pub fn parse_daily_response(body: &str) -> Result<Vec<PriceBar>, ProviderError> {
    let data: DailyAdjustedResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))?;

    if let Some(message) = data.error_message {
        return Err(ProviderError::Api(message));
    }
    if let Some(note) = data.note.or(data.information) {
        return Err(ProviderError::RateLimited(note));
    }

    let time_series = data.time_series.ok_or(ProviderError::MissingSeries)?;

    let mut bars = time_series
        .iter()
        .map(|(date_str, point)| {
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
                .map_err(|_| ProviderError::Parse(format!("invalid date {:?}", date_str)))?;
            point.to_bar(date)
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Sort by date ascending
    bars.sort_by_key(|b| b.date);

    if let Some(meta) = data.meta_data {
        debug!(
            "Parsed {} daily bars for {:?} (last refreshed {:?})",
            bars.len(),
            meta.symbol,
            meta.last_refreshed
        );
    }

    Ok(bars)
}

/// Alpha Vantage API client.
pub struct AlphaVantageClient {
    client: Client,
    api_key: String,
    base_url: String,
    /// "compact" (100 days) or "full" (20+ years).
    output_size: String,
}

impl AlphaVantageClient {
    /// Create a new Alpha Vantage client.
    pub fn new(api_key: String, timeout: Duration) -> Self {
        let client = Client::builder().timeout(timeout).build().unwrap_or_else(|e| {
            warn!("Falling back to default HTTP client: {}", e);
            Client::new()
        });

        Self {
            client,
            api_key,
            base_url: ALPHA_VANTAGE_URL.to_string(),
            output_size: "compact".to_string(),
        }
    }

    /// Point the client at a different endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_output_size(mut self, output_size: impl Into<String>) -> Self {
        self.output_size = output_size.into();
        self
    }

    /// Whether an API key is set.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

#[async_trait]
impl PriceProvider for AlphaVantageClient {
    fn name(&self) -> &str {
        "alphavantage"
    }

    async fn fetch_daily(&self, symbol: &str) -> Result<Vec<PriceBar>, ProviderError> {
        if !self.is_configured() {
            return Err(ProviderError::NotConfigured);
        }

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("function", "TIME_SERIES_DAILY_ADJUSTED"),
                ("symbol", symbol),
                ("outputsize", self.output_size.as_str()),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::HttpStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        parse_daily_response(&body)
    }
}
