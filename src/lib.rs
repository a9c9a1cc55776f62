//! StockPulse - daily trend signals for a configured universe of stock tickers

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

use std::sync::Arc;

use config::Config;
use services::SignalService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub signals: Arc<SignalService>,
}

impl AppState {
    pub fn new(config: Config, signals: SignalService) -> Self {
        Self {
            config: Arc::new(config),
            signals: Arc::new(signals),
        }
    }
}

pub use api::app;
pub use types::*;
