//! Return and RSI (Relative Strength Index) calculations.

use super::nonzero;

/// Simple return of the latest close over the close `lag` periods earlier.
pub fn period_return(prices: &[f64], lag: usize) -> f64 {
    let n = prices.len();
    let latest = prices[n - 1];
    let base = prices[n - 1 - lag];
    (latest - base) / nonzero(base)
}

/// Period-over-period price changes across the whole series.
pub fn changes(prices: &[f64]) -> Vec<f64> {
    prices.windows(2).map(|w| w[1] - w[0]).collect()
}

/// RSI over the last `period` changes.
///
/// Uses plain averages rather than Wilder smoothing: gains and losses are
/// summed over the window and divided by `period`. A window with no losses
/// divides by `EPSILON`, and a window with neither gains nor losses yields 0.
pub fn rsi(prices: &[f64], period: usize) -> f64 {
    let changes = changes(prices);
    let recent = &changes[changes.len().saturating_sub(period)..];

    let gains = recent.iter().filter(|c| **c > 0.0).sum::<f64>() / period as f64;
    let losses = recent.iter().filter(|c| **c < 0.0).sum::<f64>().abs() / period as f64;

    let rs = gains / nonzero(losses);
    100.0 - (100.0 / (1.0 + rs))
}
