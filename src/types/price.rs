use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day of OHLCV data for a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Trading day.
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Split/dividend adjusted close. Equals `close` when the source has none.
    pub adj_close: f64,
    /// Shares traded. Zero when the source has none.
    pub volume: u64,
}

impl PriceBar {
    /// Create a bar, filling in the adjusted close and volume defaults.
    pub fn new(
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        adj_close: Option<f64>,
        volume: Option<u64>,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            adj_close: adj_close.unwrap_or(close),
            volume: volume.unwrap_or(0),
        }
    }

    /// Bar where every price field is the close. Handy for close-only feeds.
    pub fn from_close(date: NaiveDate, close: f64) -> Self {
        Self::new(date, close, close, close, close, None, None)
    }
}

/// Extract the close column from an ascending bar sequence.
pub fn closes(bars: &[PriceBar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}
