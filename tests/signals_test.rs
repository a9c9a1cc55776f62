//! Signal computation tests over synthetic price histories.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use stockpulse::services::signals::classifier::{MAX_PROBABILITY, MIN_DATA_POINTS, MIN_PROBABILITY};
use stockpulse::services::signals::signal_from_bars;
use stockpulse::services::SignalService;
use stockpulse::sources::CsvPriceSource;
use stockpulse::{PriceBar, Trend};
use std::sync::Arc;

fn bars_from_closes(closes: &[f64]) -> Vec<PriceBar> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, c)| PriceBar::from_close(start + Duration::days(i as i64), *c))
        .collect()
}

// =============================================================================
// Reference scenarios
// =============================================================================

#[test]
fn test_linear_uptrend() {
    let closes: Vec<f64> = (100..130).map(f64::from).collect();
    let signal = signal_from_bars("AAPL", &bars_from_closes(&closes));

    assert_eq!(signal.trend, Trend::StrongUp);
    assert!((signal.prob_up - 0.90).abs() < 1e-9);
    assert_eq!(signal.current_price, 129.0);
    assert!((signal.monthly_return - 29.0).abs() < 1e-9);
    assert!((signal.ma_short - 127.0).abs() < 1e-9);
    assert!((signal.ma_medium - 119.5).abs() < 1e-9);
    assert_eq!(signal.data_points, 30);
    assert!(signal.volatility > 0.0);
    assert!(signal.error.is_none());
}

#[test]
fn test_linear_downtrend() {
    let closes: Vec<f64> = (0..30).map(|i| 130.0 - i as f64).collect();
    let signal = signal_from_bars("TSLA", &bars_from_closes(&closes));

    assert_eq!(signal.trend, Trend::StrongDown);
    assert!(signal.prob_up < 0.5);
    assert!(signal.prob_up >= MIN_PROBABILITY);
}

#[test]
fn test_flat_series_is_neutral() {
    let signal = signal_from_bars("FLAT", &bars_from_closes(&[50.0; 25]));
    assert_eq!(signal.trend, Trend::Neutral);
    assert!((signal.prob_up - 0.5).abs() < 1e-12);
    assert_eq!(signal.volatility, 0.0);
}

#[test]
fn test_monthly_return_uses_thirty_bar_lookback() {
    // 40 bars: the first 10 are far below and must not affect the return
    let mut closes = vec![10.0; 10];
    closes.extend((0..30).map(|i| 100.0 + i as f64));
    let signal = signal_from_bars("X", &bars_from_closes(&closes));
    assert!((signal.monthly_return - 29.0).abs() < 1e-9);
}

#[test]
fn test_service_over_csv_source() {
    let csv = "\
symbol,date,open,high,low,close,adj_close,volume
AAPL,2024-01-01,100,101,99,100,100,1000
AAPL,2024-01-02,101,102,100,101,101,1000
AAPL,2024-01-03,102,103,101,102,102,1000
AAPL,2024-01-04,103,104,102,103,103,1000
AAPL,2024-01-05,104,105,103,104,104,1000
AAPL,2024-01-08,105,106,104,105,105,1000
";
    let source = CsvPriceSource::from_reader(csv.as_bytes()).unwrap();
    let service = SignalService::new(Arc::new(source));

    let signal = tokio_test::block_on(service.compute_signal("AAPL"));
    assert_eq!(signal.data_points, 6);
    assert_eq!(signal.current_price, 105.0);
    assert_eq!(signal.trend, Trend::StrongUp);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prob_up_always_within_bounds(
        closes in prop::collection::vec(1.0f64..1_000.0, MIN_DATA_POINTS..120)
    ) {
        let signal = signal_from_bars("P", &bars_from_closes(&closes));
        prop_assert!(signal.prob_up >= MIN_PROBABILITY);
        prop_assert!(signal.prob_up <= MAX_PROBABILITY);
        prop_assert!(signal.error.is_none());
        prop_assert_eq!(signal.data_points, closes.len());
        prop_assert_eq!(signal.current_price, *closes.last().unwrap());
    }

    #[test]
    fn short_histories_are_insufficient(
        closes in prop::collection::vec(1.0f64..1_000.0, 0..MIN_DATA_POINTS)
    ) {
        let signal = signal_from_bars("P", &bars_from_closes(&closes));
        prop_assert_eq!(signal.trend, Trend::InsufficientData);
        prop_assert_eq!(signal.data_points, closes.len());
        prop_assert!(signal.is_error());
        prop_assert!(signal.to_payload().current_price.is_none());
    }

    #[test]
    fn payload_values_are_rounded(
        closes in prop::collection::vec(1.0f64..1_000.0, MIN_DATA_POINTS..60)
    ) {
        let payload = signal_from_bars("P", &bars_from_closes(&closes)).to_payload();
        for value in [payload.current_price, payload.ma5, payload.ma20].into_iter().flatten() {
            prop_assert!(((value * 100.0).round() - value * 100.0).abs() < 1e-6);
        }
    }
}
