use std::sync::Arc;

use stockpulse::config::Config;
use stockpulse::services::SignalService;
use stockpulse::sources::{AlphaVantageClient, CsvPriceSource, PriceProvider};
use stockpulse::AppState;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Pick the price provider: a local CSV file when configured, Alpha Vantage otherwise.
fn build_provider(config: &Config) -> anyhow::Result<Arc<dyn PriceProvider>> {
    if let Some(ref path) = config.price_csv_path {
        let source = CsvPriceSource::from_path(path)?;
        info!(
            "Serving prices for {} symbols from {}",
            source.len(),
            path.display()
        );
        return Ok(Arc::new(source));
    }

    if !config.has_api_key() {
        warn!("ALPHAVANTAGE_API_KEY not set, signal requests will report an error");
    }

    let client = AlphaVantageClient::new(
        config.alpha_vantage_api_key.clone(),
        config.provider_timeout,
    )
    .with_output_size(config.alpha_vantage_output_size.clone());

    Ok(Arc::new(client))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockpulse=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!("Starting StockPulse server on {}", config.bind_addr());
    info!("Tracking symbols: {}", config.symbols.join(", "));

    let provider = build_provider(&config)?;
    let signals = SignalService::new(provider).with_concurrency(config.signal_concurrency);
    info!(
        "Using {} provider (concurrency {})",
        signals.provider_name(),
        signals.concurrency()
    );

    let addr = config.bind_addr();
    let app = stockpulse::app(AppState::new(config, signals));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("StockPulse server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
