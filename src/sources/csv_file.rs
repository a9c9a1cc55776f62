//! Price history loaded from a local CSV file.
//!
//! Expected header: `symbol,date,open,high,low,close,adj_close,volume`.
//! A row is dropped only when its close does not parse. Other malformed
//! numeric fields fall back to the close (prices) or zero (volume). A date in
//! none of the accepted formats takes the date of the symbol's previous row
//! (1970-01-01 for the first), so the row keeps its place in file order.

use super::{PriceProvider, ProviderError};
use crate::types::PriceBar;
use async_trait::async_trait;
use chrono::NaiveDate;
use csv::StringRecord;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

const COL_SYMBOL: usize = 0;
const COL_DATE: usize = 1;
const COL_OPEN: usize = 2;
const COL_HIGH: usize = 3;
const COL_LOW: usize = 4;
const COL_CLOSE: usize = 5;
const COL_ADJ_CLOSE: usize = 6;
const COL_VOLUME: usize = 7;

/// In-memory per-symbol daily series.
#[derive(Debug, Clone, Default)]
pub struct CsvPriceSource {
    series: BTreeMap<String, Vec<PriceBar>>,
}

impl CsvPriceSource {
    /// Load a CSV file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, csv::Error> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    /// Load CSV data from any reader. The first line is treated as a header.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut series: BTreeMap<String, Vec<PriceBar>> = BTreeMap::new();
        let mut skipped = 0usize;

        for result in reader.records() {
            let record = match result {
                Ok(record) => record,
                Err(e) if e.is_io_error() => return Err(e),
                Err(e) => {
                    warn!("Skipping malformed CSV row: {}", e);
                    skipped += 1;
                    continue;
                }
            };

            match parse_row(&record, &series) {
                Some((symbol, bar)) => series.entry(symbol).or_default().push(bar),
                None => skipped += 1,
            }
        }

        // Stable sort keeps file order for same-day duplicates
        for bars in series.values_mut() {
            bars.sort_by_key(|b| b.date);
        }

        debug!(
            "Loaded {} symbols from CSV ({} rows skipped)",
            series.len(),
            skipped
        );

        Ok(Self { series })
    }

    /// Build a source from already parsed series.
    pub fn from_series(series: BTreeMap<String, Vec<PriceBar>>) -> Self {
        Self { series }
    }

    /// Symbols in sorted order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Bars for a symbol, matched case-insensitively.
    pub fn bars(&self, symbol: &str) -> Option<&[PriceBar]> {
        self.series
            .get(symbol)
            .or_else(|| {
                self.series
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(symbol))
                    .map(|(_, bars)| bars)
            })
            .map(Vec::as_slice)
    }

    /// Iterate `(symbol, bars)` pairs in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PriceBar])> {
        self.series
            .iter()
            .map(|(symbol, bars)| (symbol.as_str(), bars.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

fn field(record: &StringRecord, index: usize) -> Option<&str> {
    record.get(index).filter(|s| !s.is_empty())
}

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

fn parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

fn parse_row(
    record: &StringRecord,
    series: &BTreeMap<String, Vec<PriceBar>>,
) -> Option<(String, PriceBar)> {
    let symbol = field(record, COL_SYMBOL)?;
    let close: f64 = field(record, COL_CLOSE)?.parse().ok()?;
    let date = field(record, COL_DATE)
        .and_then(parse_date)
        .or_else(|| {
            let previous = series.get(symbol).and_then(|bars| bars.last());
            if previous.is_none() {
                debug!("Unparsable date for first {} row, using epoch", symbol);
            }
            previous.map(|bar| bar.date)
        })
        .unwrap_or_default();

    let price = |index: usize| {
        field(record, index)
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(close)
    };
    let adj_close = field(record, COL_ADJ_CLOSE).and_then(|v| v.parse().ok());
    let volume = field(record, COL_VOLUME).and_then(|v| v.parse().ok());

    let bar = PriceBar::new(
        date,
        price(COL_OPEN),
        price(COL_HIGH),
        price(COL_LOW),
        close,
        adj_close,
        volume,
    );
    Some((symbol.to_string(), bar))
}

#[async_trait]
impl PriceProvider for CsvPriceSource {
    fn name(&self) -> &str {
        "csv"
    }

    async fn fetch_daily(&self, symbol: &str) -> Result<Vec<PriceBar>, ProviderError> {
        self.bars(symbol)
            .map(<[PriceBar]>::to_vec)
            .ok_or_else(|| ProviderError::UnknownSymbol(symbol.to_string()))
    }
}
