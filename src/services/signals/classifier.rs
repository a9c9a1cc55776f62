//! Trend classification and up-probability for a daily bar series.

use super::indicators::{annualize_volatility, realized_vol, simple_returns, sma};
use crate::types::{closes, PriceBar, Signal, Trend};

/// Fewest bars the classifier accepts.
pub const MIN_DATA_POINTS: usize = 5;
/// Short moving average window.
pub const SHORT_MA_PERIOD: usize = 5;
/// Medium moving average window (shrinks to the series length when shorter).
pub const MEDIUM_MA_PERIOD: usize = 20;
/// Bars looked back for the monthly return.
pub const MONTHLY_LOOKBACK: usize = 30;

/// Monthly return (percent) beyond which a trend counts as strong.
const STRONG_MOVE_PCT: f64 = 2.0;
const MAX_RETURN_ADJUSTMENT: f64 = 0.15;
pub const MIN_PROBABILITY: f64 = 0.05;
pub const MAX_PROBABILITY: f64 = 0.95;

/// Derived statistics for a close series of at least [`MIN_DATA_POINTS`].
#[derive(Debug, Clone, Copy, PartialEq)]
struct Metrics {
    current_price: f64,
    monthly_return: f64,
    volatility: f64,
    ma_short: f64,
    ma_medium: f64,
}

impl Metrics {
    fn from_closes(closes: &[f64]) -> Option<Self> {
        let n = closes.len();
        let current_price = *closes.last()?;

        let lookback = MONTHLY_LOOKBACK.min(n);
        let reference = closes[n - lookback];
        let monthly_return = (current_price - reference) / reference * 100.0;

        let volatility = annualize_volatility(realized_vol(&simple_returns(closes))?);

        let ma_short = sma(closes, SHORT_MA_PERIOD)?;
        let ma_medium = sma(closes, MEDIUM_MA_PERIOD.min(n))?;

        Some(Self {
            current_price,
            monthly_return,
            volatility,
            ma_short,
            ma_medium,
        })
    }
}

/// Build a signal from an ascending bar series.
///
/// Fewer than [`MIN_DATA_POINTS`] bars gives an `insufficient_data` signal
/// with every price field left at zero.
pub fn signal_from_bars(symbol: &str, bars: &[PriceBar]) -> Signal {
    let mut signal = Signal::pending(symbol);
    signal.data_points = bars.len();

    let metrics = if bars.len() < MIN_DATA_POINTS {
        None
    } else {
        Metrics::from_closes(&closes(bars))
    };

    let Some(metrics) = metrics else {
        signal.trend = Trend::InsufficientData;
        signal.error = Some(format!("Need at least {} data points", MIN_DATA_POINTS));
        return signal;
    };

    let trend = determine_trend(
        metrics.current_price,
        metrics.ma_short,
        metrics.ma_medium,
        metrics.monthly_return,
    );

    Signal {
        trend,
        prob_up: probability_up(trend, metrics.monthly_return),
        current_price: metrics.current_price,
        monthly_return: metrics.monthly_return,
        volatility: metrics.volatility,
        ma_short: metrics.ma_short,
        ma_medium: metrics.ma_medium,
        ..signal
    }
}

/// Classify price action. Rules are checked in order, first match wins.
pub fn determine_trend(price: f64, ma_short: f64, ma_medium: f64, monthly_return: f64) -> Trend {
    if price > ma_short && ma_short > ma_medium && monthly_return > STRONG_MOVE_PCT {
        Trend::StrongUp
    } else if price > ma_medium && monthly_return > 0.0 {
        Trend::Up
    } else if price < ma_short && ma_short < ma_medium && monthly_return < -STRONG_MOVE_PCT {
        Trend::StrongDown
    } else if price < ma_medium && monthly_return < 0.0 {
        Trend::Down
    } else {
        Trend::Neutral
    }
}

/// Up-probability: the trend's base rate nudged by up to 15 points in the
/// direction of the monthly return, clamped to [0.05, 0.95].
pub fn probability_up(trend: Trend, monthly_return: f64) -> f64 {
    let adjustment = (monthly_return.abs() / 100.0).min(MAX_RETURN_ADJUSTMENT);
    let base = trend.base_probability();

    let prob = if monthly_return > 0.0 {
        base + adjustment
    } else {
        base - adjustment
    };

    prob.clamp(MIN_PROBABILITY, MAX_PROBABILITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn bars_from_closes(closes: &[f64]) -> Vec<PriceBar> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, c)| PriceBar::from_close(start + Duration::days(i as i64), *c))
            .collect()
    }

    // =========================================================================
    // determine_trend Tests
    // =========================================================================

    #[test]
    fn test_trend_strong_up() {
        assert_eq!(determine_trend(110.0, 105.0, 100.0, 5.0), Trend::StrongUp);
    }

    #[test]
    fn test_trend_up_when_return_not_strong() {
        assert_eq!(determine_trend(110.0, 105.0, 100.0, 1.5), Trend::Up);
    }

    #[test]
    fn test_trend_up_when_short_ma_below_medium() {
        assert_eq!(determine_trend(110.0, 99.0, 100.0, 5.0), Trend::Up);
    }

    #[test]
    fn test_trend_strong_down() {
        assert_eq!(determine_trend(90.0, 95.0, 100.0, -5.0), Trend::StrongDown);
    }

    #[test]
    fn test_trend_down() {
        assert_eq!(determine_trend(90.0, 95.0, 100.0, -1.0), Trend::Down);
    }

    #[test]
    fn test_trend_neutral_on_mixed_evidence() {
        // Above the medium average but losing over the month
        assert_eq!(determine_trend(110.0, 105.0, 100.0, -1.0), Trend::Neutral);
        // Below the medium average but gaining over the month
        assert_eq!(determine_trend(90.0, 95.0, 100.0, 1.0), Trend::Neutral);
        // Flat
        assert_eq!(determine_trend(100.0, 100.0, 100.0, 0.0), Trend::Neutral);
    }

    #[test]
    fn test_trend_boundaries_are_strict() {
        assert_eq!(determine_trend(110.0, 105.0, 100.0, 2.0), Trend::Up);
        assert_eq!(determine_trend(90.0, 95.0, 100.0, -2.0), Trend::Down);
    }

    // =========================================================================
    // probability_up Tests
    // =========================================================================

    #[test]
    fn test_probability_adjusts_with_return() {
        assert!((probability_up(Trend::Up, 5.0) - 0.65).abs() < 1e-12);
        assert!((probability_up(Trend::Down, -5.0) - 0.35).abs() < 1e-12);
        assert!((probability_up(Trend::Neutral, 0.0) - 0.50).abs() < 1e-12);
    }

    #[test]
    fn test_probability_adjustment_capped() {
        assert!((probability_up(Trend::Up, 40.0) - 0.75).abs() < 1e-12);
        assert!((probability_up(Trend::Down, -40.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_probability_clamped() {
        assert!((probability_up(Trend::StrongUp, 500.0) - 0.90).abs() < 1e-12);
        assert!((probability_up(Trend::StrongDown, -500.0) - 0.10).abs() < 1e-12);
        for trend in [
            Trend::StrongUp,
            Trend::Up,
            Trend::Neutral,
            Trend::Down,
            Trend::StrongDown,
            Trend::InsufficientData,
            Trend::Unknown,
        ] {
            for r in [-500.0, -2.5, 0.0, 2.5, 500.0] {
                let p = probability_up(trend, r);
                assert!((MIN_PROBABILITY..=MAX_PROBABILITY).contains(&p));
            }
        }
    }

    // =========================================================================
    // signal_from_bars Tests
    // =========================================================================

    #[test]
    fn test_signal_linear_rise() {
        let closes: Vec<f64> = (100..130).map(f64::from).collect();
        let signal = signal_from_bars("AAPL", &bars_from_closes(&closes));

        assert_eq!(signal.current_price, 129.0);
        assert_eq!(signal.data_points, 30);
        assert!((signal.monthly_return - 29.0).abs() < 1e-9);
        assert!((signal.ma_short - 127.0).abs() < 1e-9);
        assert!((signal.ma_medium - 119.5).abs() < 1e-9);
        assert_eq!(signal.trend, Trend::StrongUp);
        assert!((signal.prob_up - 0.90).abs() < 1e-12);
        assert!(signal.volatility > 0.0);
        assert!(signal.error.is_none());
    }

    #[test]
    fn test_signal_linear_decline() {
        let closes: Vec<f64> = (100..130).rev().map(f64::from).collect();
        let signal = signal_from_bars("AAPL", &bars_from_closes(&closes));
        assert_eq!(signal.trend, Trend::StrongDown);
        assert!(signal.monthly_return < 0.0);
        assert!(signal.prob_up < 0.5);
    }

    #[test]
    fn test_signal_short_history_uses_all_bars() {
        let closes = [10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0];
        let signal = signal_from_bars("X", &bars_from_closes(&closes));
        // Medium MA over all 7 bars, monthly return from the first bar
        assert!((signal.ma_medium - 13.0).abs() < 1e-12);
        assert!((signal.monthly_return - 60.0).abs() < 1e-9);
        assert!((signal.ma_short - 14.0).abs() < 1e-12);
    }

    #[test]
    fn test_signal_monthly_return_uses_30_bar_lookback() {
        let mut closes = vec![50.0; 10];
        closes.extend(std::iter::repeat(100.0).take(29));
        closes.push(110.0);
        let signal = signal_from_bars("X", &bars_from_closes(&closes));
        // 40 bars: reference is closes[10] = 100
        assert!((signal.monthly_return - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_signal_flat_series_is_neutral() {
        let signal = signal_from_bars("X", &bars_from_closes(&[20.0; 25]));
        assert_eq!(signal.trend, Trend::Neutral);
        assert_eq!(signal.volatility, 0.0);
        assert_eq!(signal.prob_up, 0.5);
    }

    #[test]
    fn test_signal_volatility_annualized() {
        let closes = [100.0, 101.0, 100.0, 101.0, 100.0, 101.0];
        let signal = signal_from_bars("X", &bars_from_closes(&closes));
        let returns = simple_returns(&closes);
        let expected = realized_vol(&returns).unwrap() * 252f64.sqrt() * 100.0;
        assert!((signal.volatility - expected).abs() < 1e-9);
    }

    #[test]
    fn test_signal_insufficient_data() {
        for n in 0..MIN_DATA_POINTS {
            let closes: Vec<f64> = (0..n).map(|i| 100.0 + i as f64).collect();
            let signal = signal_from_bars("X", &bars_from_closes(&closes));
            assert_eq!(signal.trend, Trend::InsufficientData);
            assert_eq!(signal.data_points, n);
            assert_eq!(signal.current_price, 0.0);
            assert_eq!(signal.monthly_return, 0.0);
            assert_eq!(signal.volatility, 0.0);
            assert_eq!(signal.ma_short, 0.0);
            assert_eq!(signal.ma_medium, 0.0);
            assert_eq!(signal.error.as_deref(), Some("Need at least 5 data points"));
        }
    }

    #[test]
    fn test_signal_minimum_bars() {
        let signal = signal_from_bars("X", &bars_from_closes(&[1.0, 2.0, 3.0, 4.0, 5.0]));
        assert_ne!(signal.trend, Trend::InsufficientData);
        assert_ne!(signal.trend, Trend::Unknown);
        assert_eq!(signal.ma_short, signal.ma_medium);
    }
}
