//! Signal decomposition: rolling trend, residual noise, rolling volatility.

use serde::{Deserialize, Serialize};

use crate::types::PricePoint;

/// Rolling window for trend and volatility.
pub const DECOMPOSITION_WINDOW: usize = 20;

/// Most recent observations considered.
pub const MAX_DECOMPOSITION_POINTS: usize = 726;

/// One decomposed observation. Values are rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecompositionPoint {
    pub date: String,
    pub close: f64,
    pub trend: f64,
    pub noise: f64,
    /// Rolling standard deviation of returns, in percent.
    pub volatility: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sample (n - 1) standard deviation.
fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Decompose an ascending price series.
///
/// Points without a full window of history (the first
/// [`DECOMPOSITION_WINDOW`]) are dropped, so a series of that length or
/// shorter yields nothing.
pub fn decompose(points: &[PricePoint]) -> Vec<DecompositionPoint> {
    let points = &points[points.len().saturating_sub(MAX_DECOMPOSITION_POINTS)..];
    let window = DECOMPOSITION_WINDOW;
    if points.len() <= window {
        return Vec::new();
    }

    let closes: Vec<f64> = points.iter().map(|p| p.close).collect();
    // returns[i] is the return into closes[i]; returns[0] is undefined.
    let returns: Vec<f64> = std::iter::once(f64::NAN)
        .chain(closes.windows(2).map(|w| (w[1] - w[0]) / w[0]))
        .collect();

    (window..points.len())
        .map(|i| {
            let trend = closes[i + 1 - window..=i].iter().sum::<f64>() / window as f64;
            let volatility = sample_std_dev(&returns[i + 1 - window..=i]) * 100.0;
            DecompositionPoint {
                date: points[i].date.format("%Y-%m-%d").to_string(),
                close: round2(closes[i]),
                trend: round2(trend),
                noise: round2(closes[i] - trend),
                volatility: round2(volatility),
            }
        })
        .collect()
}
