//! Dispersion measures: return volatility, Bollinger Band position, period ranges.

use super::moving_average::sma;
use super::nonzero;

/// Population standard deviation around `mean`.
pub fn std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Standard deviation of the last `period` period-over-period returns.
///
/// Returns are collected newest first.
pub fn return_volatility(prices: &[f64], period: usize) -> f64 {
    let n = prices.len();
    let returns: Vec<f64> = (1..=period)
        .take_while(|i| *i < n)
        .map(|i| {
            let base = prices[n - i - 1];
            (prices[n - i] - base) / nonzero(base)
        })
        .collect();

    if returns.is_empty() {
        return 0.0;
    }
    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    std_dev(&returns, mean)
}

/// %B: where the latest close sits between the Bollinger Bands.
///
/// Bands are `SMA(period) ± multiplier · σ(period)`. 0 is the lower band,
/// 1 the upper band, 0.5 the middle.
pub fn bollinger_position(prices: &[f64], period: usize, multiplier: f64) -> f64 {
    let window = &prices[prices.len().saturating_sub(period)..];
    let middle = sma(prices, period);
    let sigma = std_dev(window, middle);

    let upper = middle + multiplier * sigma;
    let lower = middle - multiplier * sigma;
    let current = prices[prices.len() - 1];

    (current - lower) / nonzero(upper - lower)
}

/// Absolute percentage move of each of the last `period` closes against the
/// close before it, relative to the later close.
pub fn range_series(prices: &[f64], period: usize) -> Vec<f64> {
    let n = prices.len();
    (n.saturating_sub(period)..n)
        .map(|i| {
            let previous = if i == 0 { prices[i] } else { prices[i - 1] };
            (prices[i] - previous).abs() / nonzero(prices[i]) * 100.0
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_std_dev() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(std_dev(&values, 5.0), 2.0);
        assert_eq!(std_dev(&[], 0.0), 0.0);
    }

    #[test]
    fn test_return_volatility_constant_growth() {
        // Every return is exactly 10%.
        let mut prices = vec![100.0];
        for _ in 0..10 {
            let last = *prices.last().unwrap();
            prices.push(last * 1.1);
        }
        assert!(return_volatility(&prices, 5) < 1e-12);
    }

    #[test]
    fn test_return_volatility_alternating() {
        // Returns alternate between +10% and -10%/1.1.
        let prices: Vec<f64> = (0..30).map(|i| if i % 2 == 0 { 100.0 } else { 110.0 }).collect();
        let up: f64 = 0.1;
        let down = -10.0 / 110.0;
        let mean = (up + down) / 2.0;
        let expected = (up - mean).abs();
        assert!((return_volatility(&prices, 20) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_bollinger_position_at_middle() {
        // Window averages 100 and ends on 100.
        let mut prices = vec![90.0, 110.0].repeat(9);
        prices.extend([100.0, 100.0]);
        let mean = prices.iter().sum::<f64>() / 20.0;
        assert_eq!(mean, 100.0);
        assert!((bollinger_position(&prices, 20, 2.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_bollinger_position_flat() {
        assert_eq!(bollinger_position(&[5.0; 20], 20, 2.0), 0.0);
    }

    #[test]
    fn test_range_series() {
        let prices = [100.0, 110.0, 99.0];
        let ranges = range_series(&prices, 2);
        assert_eq!(ranges.len(), 2);
        assert!((ranges[0] - 10.0 / 110.0 * 100.0).abs() < 1e-12);
        assert!((ranges[1] - 11.0 / 99.0 * 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_range_series_first_element_has_no_move() {
        assert_eq!(range_series(&[50.0, 55.0], 5), vec![0.0, 5.0 / 55.0 * 100.0]);
    }
}
