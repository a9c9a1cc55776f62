use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Symbols served when `STOCK_SYMBOLS` is not set.
pub const DEFAULT_SYMBOLS: &str = "AAPL,MSFT,GOOG,AMZN,NVDA,META,TSLA";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Alpha Vantage API key. Empty when not configured.
    pub alpha_vantage_api_key: String,
    /// Alpha Vantage `outputsize`: "compact" or "full".
    pub alpha_vantage_output_size: String,
    /// Timeout for a single provider request.
    pub provider_timeout: Duration,
    /// Symbols computed by the batch endpoints.
    pub symbols: Vec<String>,
    /// Provider calls allowed in flight during batch computations.
    pub signal_concurrency: usize,
    /// Serve prices from this CSV file instead of Alpha Vantage.
    pub price_csv_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let alpha_vantage_api_key = lookup("ALPHAVANTAGE_API_KEY")
            .or_else(|| lookup("ALPHA_VANTAGE_API_KEY"))
            .unwrap_or_default();

        Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            alpha_vantage_api_key,
            alpha_vantage_output_size: lookup("ALPHAVANTAGE_OUTPUT_SIZE")
                .unwrap_or_else(|| "compact".to_string()),
            provider_timeout: Duration::from_secs(
                lookup("PROVIDER_TIMEOUT_SECS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30),
            ),
            symbols: split_symbols(
                &lookup("STOCK_SYMBOLS").unwrap_or_else(|| DEFAULT_SYMBOLS.to_string()),
            ),
            signal_concurrency: lookup("SIGNAL_CONCURRENCY")
                .and_then(|v| v.parse().ok())
                .filter(|n: &usize| *n > 0)
                .unwrap_or(1),
            price_csv_path: lookup("PRICE_CSV_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    /// Whether an Alpha Vantage key is available.
    pub fn has_api_key(&self) -> bool {
        !self.alpha_vantage_api_key.is_empty()
    }

    /// Address the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Split a comma separated symbol list, trimming blanks and dropping empties.
pub fn split_symbols(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(|s| s.trim_matches(|c| c == ' ' || c == '\t'))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
