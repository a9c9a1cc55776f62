//! Log-price regression slope (momentum).

/// OLS slope of `ln(price)` against a 0-based time index.
///
/// Returns `None` for fewer than two prices or when any price is not
/// strictly positive.
pub fn slope_logprice(prices: &[f64]) -> Option<f64> {
    let n = prices.len();
    if n < 2 || prices.iter().any(|p| *p <= 0.0) {
        return None;
    }

    let x_mean = (n - 1) as f64 / 2.0;
    let y: Vec<f64> = prices.iter().map(|p| p.ln()).collect();
    let y_mean = y.iter().sum::<f64>() / n as f64;

    let (num, den) = y
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(num, den), (i, yi)| {
            let dx = i as f64 - x_mean;
            (num + dx * (yi - y_mean), den + dx * dx)
        });

    if den == 0.0 {
        return None;
    }

    Some(num / den)
}
