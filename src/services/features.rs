//! Per-symbol feature table for the CSV batch driver.

use crate::services::signals::indicators::{
    atr, ema, max_drawdown, realized_vol, rsi, simple_returns, slope_logprice, sma,
};
use crate::sources::CsvPriceSource;
use crate::types::{closes, PriceBar};
use chrono::NaiveDate;
use std::io::Write;
use thiserror::Error;

/// Symbols with fewer closes than this are left out of the table.
pub const MIN_FEATURE_HISTORY: usize = 60;

/// Window for the momentum slope and realized volatility columns.
const SHORT_WINDOW: usize = 20;

pub const HEADER: [&str; 8] = [
    "symbol", "as_of", "close", "ma50", "ma200", "ema20", "slope20", "rv20",
];
pub const EXTENDED_HEADER: [&str; 3] = ["rsi14", "atr14", "max_drawdown"];

#[derive(Error, Debug)]
pub enum FeatureError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One output line of the feature table.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub symbol: String,
    /// Date of the latest bar.
    pub as_of: NaiveDate,
    pub close: f64,
    pub ma50: Option<f64>,
    /// Missing until 200 closes are available.
    pub ma200: Option<f64>,
    pub ema20: Option<f64>,
    /// Log-price slope over the last 20 closes, 0 when it cannot be fitted.
    pub slope20: f64,
    /// Daily volatility of the last 20 returns (not annualized).
    pub rv20: Option<f64>,
    pub rsi14: Option<f64>,
    pub atr14: Option<f64>,
    pub max_drawdown: f64,
}

impl FeatureRow {
    fn record(&self, extended: bool) -> Vec<String> {
        let mut record = vec![
            self.symbol.clone(),
            self.as_of.to_string(),
            self.close.to_string(),
            format_opt(self.ma50),
            format_opt(self.ma200),
            format_opt(self.ema20),
            self.slope20.to_string(),
            format_opt(self.rv20),
        ];
        if extended {
            record.push(format_opt(self.rsi14));
            record.push(format_opt(self.atr14));
            record.push(self.max_drawdown.to_string());
        }
        record
    }
}

fn format_opt(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Feature row for one symbol, or `None` below [`MIN_FEATURE_HISTORY`] bars.
pub fn compute_features(symbol: &str, bars: &[PriceBar]) -> Option<FeatureRow> {
    let n = bars.len();
    if n < MIN_FEATURE_HISTORY {
        return None;
    }

    let last = bars.last()?;
    let closes = closes(bars);
    let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
    let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();

    Some(FeatureRow {
        symbol: symbol.to_string(),
        as_of: last.date,
        close: last.close,
        ma50: sma(&closes, 50),
        ma200: sma(&closes, 200),
        ema20: ema(&closes, SHORT_WINDOW),
        slope20: slope_logprice(&closes[n - SHORT_WINDOW..]).unwrap_or(0.0),
        rv20: realized_vol(&simple_returns(&closes[n - SHORT_WINDOW - 1..])),
        rsi14: rsi(&closes, 14),
        atr14: atr(&highs, &lows, &closes, 14),
        max_drawdown: max_drawdown(&closes),
    })
}

/// Feature rows for every symbol with enough history, in symbol order.
pub fn compute_all(source: &CsvPriceSource) -> Vec<FeatureRow> {
    source
        .iter()
        .filter_map(|(symbol, bars)| compute_features(symbol, bars))
        .collect()
}

/// Write the feature table as CSV, header first.
pub fn write_features<W: Write>(
    writer: W,
    rows: &[FeatureRow],
    extended: bool,
) -> Result<(), FeatureError> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header: Vec<&str> = HEADER.to_vec();
    if extended {
        header.extend(EXTENDED_HEADER);
    }
    wtr.write_record(&header)?;

    for row in rows {
        wtr.write_record(row.record(extended))?;
    }

    wtr.flush()?;
    Ok(())
}
