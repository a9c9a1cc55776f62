//! Realized volatility from periodic returns.

/// Trading days per year used to annualize daily volatility.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Sample standard deviation of a return series.
///
/// Divides by `n - 1`, or by 1 for a single return. Returns `None` when the
/// series is empty.
pub fn realized_vol(returns: &[f64]) -> Option<f64> {
    if returns.is_empty() {
        return None;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let sum_sq: f64 = returns.iter().map(|r| (r - mean).powi(2)).sum();
    let divisor = if returns.len() > 1 { n - 1.0 } else { 1.0 };

    Some((sum_sq / divisor).sqrt())
}

/// Day-over-day simple returns `(p[i] - p[i-1]) / p[i-1]`.
pub fn simple_returns(prices: &[f64]) -> Vec<f64> {
    prices
        .windows(2)
        .map(|w| (w[1] - w[0]) / w[0])
        .collect()
}

/// Scale a daily volatility to an annualized percentage.
pub fn annualize_volatility(daily: f64) -> f64 {
    daily * TRADING_DAYS_PER_YEAR.sqrt() * 100.0
}
