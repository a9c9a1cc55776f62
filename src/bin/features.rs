//! Feature table for a CSV of daily prices.
//!
//! Reads `symbol,date,open,high,low,close[,adj_close,volume]` rows and writes
//! one feature line per symbol with at least 60 closes to stdout.

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use stockpulse::services::{compute_all, write_features};
use stockpulse::sources::CsvPriceSource;
use tracing::debug;

#[derive(Parser)]
#[command(name = "features", about = "Compute per-symbol features from a price CSV")]
struct Cli {
    /// Input CSV with a header row.
    input: PathBuf,

    /// Also emit rsi14, atr14 and max_drawdown columns.
    #[arg(long, default_value_t = false)]
    extended: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let file = match File::open(&cli.input) {
        Ok(f) => f,
        Err(_) => {
            eprintln!("Cannot open {}", cli.input.display());
            return ExitCode::from(2);
        }
    };

    let source = match CsvPriceSource::from_reader(file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Failed to read {}: {}", cli.input.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let rows = compute_all(&source);
    debug!(
        "{} of {} symbols have enough history",
        rows.len(),
        source.len()
    );

    let stdout = io::stdout();
    if let Err(e) = write_features(stdout.lock(), &rows, cli.extended) {
        eprintln!("Failed to write features: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
