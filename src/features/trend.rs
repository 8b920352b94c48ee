//! Linear trend of a price window.

/// Ordinary least-squares slope of `values` against their index.
pub fn slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = values.iter().sum::<f64>() / n as f64;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        numerator += dx * (y - y_mean);
        denominator += dx.powi(2);
    }
    numerator / denominator
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slope_of_line() {
        let values: Vec<f64> = (0..20).map(|i| 3.0 + 2.5 * i as f64).collect();
        assert!((slope(&values) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_slope_sign() {
        let down: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
        assert!(slope(&down) < 0.0);
        assert_eq!(slope(&[7.0; 20]), 0.0);
    }

    #[test]
    fn test_slope_degenerate() {
        assert_eq!(slope(&[1.0]), 0.0);
        assert_eq!(slope(&[]), 0.0);
    }
}
