//! Exponential Moving Average (EMA) indicator.

/// EMA over the whole series.
///
/// Seeded with the SMA of the first `period` values, then every later value
/// is folded in with `k = 2 / (period + 1)`. Returns `None` under the same
/// conditions as [`super::sma`].
pub fn ema(series: &[f64], period: usize) -> Option<f64> {
    if period == 0 || series.len() < period {
        return None;
    }

    let k = 2.0 / (period as f64 + 1.0);

    // First EMA is SMA
    let seed = series.iter().take(period).sum::<f64>() / period as f64;

    Some(
        series
            .iter()
            .skip(period)
            .fold(seed, |prev, value| value * k + prev * (1.0 - k)),
    )
}
