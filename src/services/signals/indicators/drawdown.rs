//! Maximum drawdown.

/// Largest peak-to-trough decline as a fraction of the running peak.
///
/// The peak starts at the first price. An empty series has no drawdown.
pub fn max_drawdown(prices: &[f64]) -> f64 {
    let Some(&first) = prices.first() else {
        return 0.0;
    };

    let mut peak = first;
    let mut max_dd = 0.0;
    for &price in prices {
        peak = peak.max(price);
        let dd = (peak - price) / peak;
        if dd > max_dd {
            max_dd = dd;
        }
    }
    max_dd
}
