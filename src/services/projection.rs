//! Prediction overlay for the price history chart.
//!
//! The classifier only returns a direction and its probability. The overlay
//! turns that into a straight projected line over the last fifth of the
//! chart, sloped by how far the up-probability sits from 0.5.

use crate::types::{OverlayPoint, PricePoint};

/// Fraction of the history left of where the overlay starts.
const OVERLAY_START: f64 = 0.8;

/// Price move per unit of probability away from 0.5, relative to the last close.
const OVERLAY_SCALE: f64 = 0.3;

/// Projected line over the tail of `points` for a given up-probability.
///
/// Starts at the actual close at index `floor(len * 0.8)` and moves linearly
/// toward `start + change`, where `change = last * (p_up - 0.5) * 0.3` on an
/// up call and `last * (0.5 - p_up) * -0.3` otherwise.
pub fn project(points: &[PricePoint], probability_up: f64) -> Vec<OverlayPoint> {
    let Some(last) = points.last() else {
        return Vec::new();
    };
    let len = points.len();
    let start = (len as f64 * OVERLAY_START).floor() as usize;
    let start_price = points[start].close;

    let change = if probability_up > 0.5 {
        last.close * (probability_up - 0.5) * OVERLAY_SCALE
    } else {
        last.close * (0.5 - probability_up) * -OVERLAY_SCALE
    };

    points[start..]
        .iter()
        .enumerate()
        .map(|(offset, point)| {
            let progress = offset as f64 / (len - start) as f64;
            OverlayPoint {
                date: point.date,
                price: point.close,
                prediction: start_price + change * progress,
            }
        })
        .collect()
}

/// Confidence in [0, 1] as a whole percentage.
pub fn confidence_pct(confidence: f64) -> u8 {
    (confidence.clamp(0.0, 1.0) * 100.0).round() as u8
}
