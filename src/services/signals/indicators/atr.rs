//! Average True Range (ATR) indicator.

/// True range of a bar given the previous close:
/// `max(high - low, |high - prev_close|, |low - prev_close|)`.
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    let hl = high - low;
    let hc = (high - prev_close).abs();
    let lc = (low - prev_close).abs();
    hl.max(hc).max(lc)
}

/// Simple average of the last `period` true ranges.
///
/// True ranges start at the second bar, so at least `period + 1` closes are
/// needed. Returns `None` when that is not met, when `period` is zero, or
/// when the three slices differ in length.
pub fn atr(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> Option<f64> {
    let n = closes.len();
    if period == 0 || n < period + 1 || highs.len() != n || lows.len() != n {
        return None;
    }

    let sum: f64 = (n - period..n)
        .map(|i| true_range(highs[i], lows[i], closes[i - 1]))
        .sum();

    Some(sum / period as f64)
}
