//! Simple Moving Average (SMA) indicator.

/// Arithmetic mean of the last `period` values.
///
/// Returns `None` if `period` is zero or the series is shorter than `period`.
pub fn sma(series: &[f64], period: usize) -> Option<f64> {
    if period == 0 || series.len() < period {
        return None;
    }

    let sum: f64 = series.iter().rev().take(period).sum();
    Some(sum / period as f64)
}
