//! Technical feature extraction for the trend classifier.
//!
//! Turns an ascending series of monthly closes into the fixed 16-field
//! [`FeatureVector`] the external model was trained on. Field names and
//! formulas are part of the model contract: renaming a field or altering a
//! formula silently changes the input distribution the model sees.

pub mod decomposition;
pub mod momentum;
pub mod moving_average;
pub mod trend;
pub mod volatility;

pub use decomposition::{decompose, DecompositionPoint};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fewest observations the extractor accepts. SMA_Cross_10_50 looks back 50 periods.
pub const MIN_OBSERVATIONS: usize = 50;

/// Replacement for any denominator that comes out exactly zero.
pub const EPSILON: f64 = 0.0001;

/// Volume is not available from the monthly series.
pub const VOLUME_RATIO: f64 = 1.0;

/// Field names in the order the classifier lists them.
pub const FEATURE_NAMES: [&str; 16] = [
    "Return_1d",
    "Return_5d",
    "Return_10d",
    "SMA_Cross_5_20",
    "SMA_Cross_10_50",
    "RSI_14",
    "BB_Position",
    "MACD_Diff",
    "Volume_Ratio",
    "Volatility_5d",
    "Volatility_20d",
    "Daily_Range",
    "Daily_Range_MA",
    "Trend",
    "Noise",
    "Volatility",
];

/// Errors raised by [`extract_features`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeatureError {
    #[error("Insufficient data: need at least {required} prices, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Invalid price {value} at index {index}")]
    InvalidPrice { index: usize, value: f64 },

    #[error("Feature {name} is not finite ({value}); prices are out of range")]
    NonFiniteFeature { name: &'static str, value: f64 },
}

/// Feature vector submitted to the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    #[serde(rename = "Return_1d")]
    pub return_1d: f64,
    #[serde(rename = "Return_5d")]
    pub return_5d: f64,
    #[serde(rename = "Return_10d")]
    pub return_10d: f64,
    #[serde(rename = "SMA_Cross_5_20")]
    pub sma_cross_5_20: u8,
    #[serde(rename = "SMA_Cross_10_50")]
    pub sma_cross_10_50: u8,
    #[serde(rename = "RSI_14")]
    pub rsi_14: f64,
    #[serde(rename = "BB_Position")]
    pub bb_position: f64,
    #[serde(rename = "MACD_Diff")]
    pub macd_diff: f64,
    #[serde(rename = "Volume_Ratio")]
    pub volume_ratio: f64,
    #[serde(rename = "Volatility_5d")]
    pub volatility_5d: f64,
    #[serde(rename = "Volatility_20d")]
    pub volatility_20d: f64,
    #[serde(rename = "Daily_Range")]
    pub daily_range: f64,
    #[serde(rename = "Daily_Range_MA")]
    pub daily_range_ma: f64,
    #[serde(rename = "Trend")]
    pub trend: u8,
    #[serde(rename = "Noise")]
    pub noise: f64,
    #[serde(rename = "Volatility")]
    pub volatility: f64,
}

impl FeatureVector {
    /// Values paired with their wire names, in [`FEATURE_NAMES`] order.
    pub fn named_values(&self) -> [(&'static str, f64); 16] {
        [
            ("Return_1d", self.return_1d),
            ("Return_5d", self.return_5d),
            ("Return_10d", self.return_10d),
            ("SMA_Cross_5_20", f64::from(self.sma_cross_5_20)),
            ("SMA_Cross_10_50", f64::from(self.sma_cross_10_50)),
            ("RSI_14", self.rsi_14),
            ("BB_Position", self.bb_position),
            ("MACD_Diff", self.macd_diff),
            ("Volume_Ratio", self.volume_ratio),
            ("Volatility_5d", self.volatility_5d),
            ("Volatility_20d", self.volatility_20d),
            ("Daily_Range", self.daily_range),
            ("Daily_Range_MA", self.daily_range_ma),
            ("Trend", f64::from(self.trend)),
            ("Noise", self.noise),
            ("Volatility", self.volatility),
        ]
    }

    /// True when every field is a finite number.
    pub fn is_finite(&self) -> bool {
        self.named_values().iter().all(|(_, v)| v.is_finite())
    }
}

/// Use [`EPSILON`] in place of a denominator that is exactly zero.
pub(crate) fn nonzero(denominator: f64) -> f64 {
    if denominator == 0.0 {
        EPSILON
    } else {
        denominator
    }
}

fn flag(condition: bool) -> u8 {
    if condition {
        1
    } else {
        0
    }
}

/// Derive the classifier features from ascending closing prices.
///
/// Index `len - 1` is the most recent close. Fails with
/// [`FeatureError::InsufficientData`] below [`MIN_OBSERVATIONS`] and with
/// [`FeatureError::InvalidPrice`] on a non-finite or non-positive close.
/// Prices at the edges of the `f64` range can still overflow an intermediate
/// sum; those fail with [`FeatureError::NonFiniteFeature`] rather than
/// returning a partial vector.
pub fn extract_features(prices: &[f64]) -> Result<FeatureVector, FeatureError> {
    if prices.len() < MIN_OBSERVATIONS {
        return Err(FeatureError::InsufficientData {
            required: MIN_OBSERVATIONS,
            actual: prices.len(),
        });
    }
    if let Some((index, &value)) = prices
        .iter()
        .enumerate()
        .find(|(_, p)| !p.is_finite() || **p <= 0.0)
    {
        return Err(FeatureError::InvalidPrice { index, value });
    }

    let sma5 = moving_average::sma(prices, 5);
    let sma10 = moving_average::sma(prices, 10);
    let sma20 = moving_average::sma(prices, 20);
    let sma50 = moving_average::sma(prices, 50);

    let volatility_5d = volatility::return_volatility(prices, 5);
    let volatility_20d = volatility::return_volatility(prices, 20);
    let ranges = volatility::range_series(prices, 20);
    let daily_range = ranges.last().copied().unwrap_or(0.0);
    let daily_range_ma = ranges.iter().sum::<f64>() / ranges.len() as f64;

    let features = FeatureVector {
        return_1d: momentum::period_return(prices, 1),
        return_5d: momentum::period_return(prices, 5),
        return_10d: momentum::period_return(prices, 10),
        sma_cross_5_20: flag(sma5 > sma20),
        sma_cross_10_50: flag(sma10 > sma50),
        rsi_14: momentum::rsi(prices, 14),
        bb_position: volatility::bollinger_position(prices, 20, 2.0),
        macd_diff: moving_average::macd_ratio(prices, 12, 26),
        volume_ratio: VOLUME_RATIO,
        volatility_5d,
        volatility_20d,
        daily_range,
        daily_range_ma,
        trend: flag(trend::slope(&prices[prices.len() - 20..]) > 0.0),
        noise: volatility_5d / nonzero(volatility_20d),
        volatility: volatility_20d,
    };

    if let Some((name, value)) = features
        .named_values()
        .into_iter()
        .find(|(_, v)| !v.is_finite())
    {
        return Err(FeatureError::NonFiniteFeature { name, value });
    }
    Ok(features)
}
