use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Predicted price direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
}

impl TrendDirection {
    /// Direction for a classifier class: 1 is up, anything else is down.
    pub fn from_class(prediction: i32) -> Self {
        if prediction == 1 {
            TrendDirection::Up
        } else {
            TrendDirection::Down
        }
    }
}

/// Classifier response to `POST /predict`. Field names are the model API's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub prediction: i32,
    pub prediction_label: String,
    pub probability_up: f64,
    pub probability_down: f64,
    pub confidence: f64,
}

impl PredictResponse {
    pub fn direction(&self) -> TrendDirection {
        TrendDirection::from_class(self.prediction)
    }

    /// Check probabilities are finite and confidence lies in [0, 1].
    pub fn validate(&self) -> Result<(), String> {
        let probabilities = [self.probability_up, self.probability_down, self.confidence];
        if probabilities.iter().any(|p| !p.is_finite()) {
            return Err("non-finite probability in model response".to_string());
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(format!("confidence {} outside [0, 1]", self.confidence));
        }
        Ok(())
    }
}

/// Classifier `GET /health` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelHealth {
    pub status: String,
    pub model_loaded: bool,
    pub scaler_loaded: bool,
    pub features_count: usize,
}

/// Classifier `GET /model-info` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    #[serde(default)]
    pub model_type: String,
    #[serde(default)]
    pub training_date: String,
    pub features: Vec<String>,
    pub n_features: usize,
}

/// Projected price drawn over the tail of the history chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayPoint {
    pub date: NaiveDate,
    pub price: f64,
    pub prediction: f64,
}

/// Prediction as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionView {
    pub symbol: String,
    pub prediction: i32,
    pub label: String,
    pub direction: TrendDirection,
    pub probability_up: f64,
    pub probability_down: f64,
    /// Confidence as a whole percentage.
    pub confidence_pct: u8,
    pub current_price: f64,
    pub overlay: Vec<OverlayPoint>,
}
