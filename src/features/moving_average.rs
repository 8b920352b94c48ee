//! Simple and exponential moving averages, MACD.

use super::nonzero;

/// Mean of the last `period` values.
pub fn sma(values: &[f64], period: usize) -> f64 {
    let window = &values[values.len().saturating_sub(period)..];
    window.iter().sum::<f64>() / period as f64
}

/// EMA over the whole slice, seeded with its first value.
///
/// `k = 2 / (period + 1)`. The slice is usually shorter than a warm-up
/// would require; the seed stands in for the missing history.
pub fn ema(values: &[f64], period: usize) -> f64 {
    let k = 2.0 / (period as f64 + 1.0);
    let mut iter = values.iter();
    let Some(&seed) = iter.next() else {
        return 0.0;
    };
    iter.fold(seed, |acc, &v| v * k + acc * (1.0 - k))
}

/// MACD line relative to the latest close.
///
/// Both EMAs run over the same trailing `slow` closes.
pub fn macd_ratio(prices: &[f64], fast: usize, slow: usize) -> f64 {
    let window = &prices[prices.len().saturating_sub(slow)..];
    let macd_line = ema(window, fast) - ema(window, slow);
    macd_line / nonzero(prices[prices.len() - 1])
}
