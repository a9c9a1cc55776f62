//! Trading signals service module.
//!
//! Fetches daily history from a [`PriceProvider`], runs the indicator
//! library over it and classifies the result into a [`Signal`].

pub mod classifier;
pub mod indicators;

pub use classifier::{determine_trend, probability_up, signal_from_bars};

use crate::sources::{PriceProvider, ProviderError};
use crate::types::{IngestReport, PriceBar, Signal};
use futures_util::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Message used when a provider succeeds but returns no bars.
pub const NO_DATA_MESSAGE: &str = "No price data returned";

/// Computes signals for symbols using a price provider.
pub struct SignalService {
    provider: Arc<dyn PriceProvider>,
    /// Maximum symbols fetched at once in batch calls.
    concurrency: usize,
}

impl SignalService {
    /// Create a service that processes batches one symbol at a time.
    pub fn new(provider: Arc<dyn PriceProvider>) -> Self {
        Self {
            provider,
            concurrency: 1,
        }
    }

    /// Allow up to `concurrency` provider calls in flight during batches.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    async fn fetch(&self, symbol: &str) -> Result<Vec<PriceBar>, ProviderError> {
        let bars = self.provider.fetch_daily(symbol).await?;
        if bars.is_empty() {
            return Err(ProviderError::Api(NO_DATA_MESSAGE.to_string()));
        }
        Ok(bars)
    }

    /// Compute the signal for one symbol. Never fails: provider errors are
    /// carried in the signal's `error` field.
    pub async fn compute_signal(&self, symbol: &str) -> Signal {
        match self.fetch(symbol).await {
            Ok(bars) => {
                let signal = signal_from_bars(symbol, &bars);
                debug!(
                    "Computed {} ({}) signal for {} from {} bars (prob_up {:.2})",
                    signal.trend,
                    signal.trend.label(),
                    symbol,
                    signal.data_points,
                    signal.prob_up
                );
                signal
            }
            Err(e) => {
                warn!(
                    "Failed to fetch {} from {}: {}",
                    symbol,
                    self.provider.name(),
                    e
                );
                Signal::failed(symbol, e.to_string())
            }
        }
    }

    /// Compute signals for several symbols, in input order.
    ///
    /// Each symbol is independent; one failure does not affect the others.
    pub async fn compute_signals(&self, symbols: &[String]) -> Vec<Signal> {
        stream::iter(symbols.iter().cloned())
            .map(|symbol| async move { self.compute_signal(&symbol).await })
            .buffered(self.concurrency)
            .collect()
            .await
    }

    /// Fetch every symbol once and report how many bars came back.
    pub async fn ingest(&self, symbols: &[String]) -> IngestReport {
        let results: Vec<(String, Result<Vec<PriceBar>, ProviderError>)> =
            stream::iter(symbols.iter().cloned())
                .map(|symbol| async move {
                    let result = self.fetch(&symbol).await;
                    (symbol, result)
                })
                .buffered(self.concurrency)
                .collect()
                .await;

        let mut report = IngestReport {
            symbols_attempted: symbols.len(),
            ..IngestReport::default()
        };

        for (symbol, result) in results {
            match result {
                Ok(bars) => report.records_ingested += bars.len(),
                Err(e) => {
                    warn!("Ingest failed for {}: {}", symbol, e);
                    report.failed_symbols.push(format!("{}: {}", symbol, e));
                }
            }
        }

        info!(
            "Ingested {} records for {} symbols ({} failed)",
            report.records_ingested,
            report.symbols_attempted,
            report.failed_symbols.len()
        );

        report
    }
}
