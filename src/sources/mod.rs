//! Daily price providers.

pub mod alphavantage;
pub mod csv_file;

pub use alphavantage::AlphaVantageClient;
pub use csv_file::CsvPriceSource;

use crate::types::PriceBar;
use async_trait::async_trait;
use thiserror::Error;

/// Why a provider could not return bars for a symbol.
///
/// The `Display` text is what ends up in a signal's `error` field.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("API key not configured")]
    NotConfigured,

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("HTTP error: {0}")]
    HttpStatus(u16),

    #[error("{0}")]
    Api(String),

    #[error("Rate limit: {0}")]
    RateLimited(String),

    #[error("No time series data in response")]
    MissingSeries,

    #[error("JSON parse error: {0}")]
    Parse(String),

    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),
}

/// Source of ascending daily bars for a symbol.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Fetch the daily history for `symbol`, oldest bar first.
    async fn fetch_daily(&self, symbol: &str) -> Result<Vec<PriceBar>, ProviderError>;
}
