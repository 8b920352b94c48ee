//! Client for the external trend classifier API.
//!
//! The classifier scales the 16 features and runs a binary model behind
//! `POST /predict`. It also exposes `GET /health` and `GET /model-info`.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::features::FeatureVector;
use crate::types::{ModelHealth, ModelInfo, PredictResponse};

/// Trend classifier API client.
pub struct ModelClient {
    client: Client,
    base_url: String,
}

impl ModelClient {
    /// Create a new classifier client.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Submit features and get the trend prediction.
    pub async fn predict(&self, features: &FeatureVector) -> Result<PredictResponse> {
        debug!("Requesting prediction from {}", self.base_url);
        let response = self
            .client
            .post(self.url("/predict"))
            .json(features)
            .send()
            .await?;

        let prediction: PredictResponse = read_json(response).await?;
        prediction.validate().map_err(AppError::ExternalApi)?;
        Ok(prediction)
    }

    /// Classifier liveness and model load state.
    pub async fn health(&self) -> Result<ModelHealth> {
        let response = self.client.get(self.url("/health")).send().await?;
        read_json(response).await
    }

    /// Model type, training date and expected feature names.
    pub async fn model_info(&self) -> Result<ModelInfo> {
        let response = self.client.get(self.url("/model-info")).send().await?;
        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let detail = error_detail(&body);
        warn!("Classifier returned {}: {}", status, detail);
        return Err(AppError::ExternalApi(format!(
            "Classifier returned {}: {}",
            status, detail
        )));
    }
    Ok(response.json::<T>().await?)
}

/// Pull `detail` out of an error body, falling back to the raw text.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").map(|d| match d.as_str() {
            Some(s) => s.to_string(),
            None => d.to_string(),
        }))
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let client = ModelClient::new("http://localhost:8000/", Duration::from_secs(1));
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/predict"), "http://localhost:8000/predict");
    }

    #[test]
    fn test_error_detail_string() {
        let body = r#"{"detail": "Erro ao fazer predição: bad input"}"#;
        assert_eq!(error_detail(body), "Erro ao fazer predição: bad input");
    }

    #[test]
    fn test_error_detail_validation_list() {
        let body = r#"{"detail": [{"loc": ["body", "RSI_14"], "msg": "too large"}]}"#;
        assert!(error_detail(body).contains("RSI_14"));
    }

    #[test]
    fn test_error_detail_plain_text() {
        assert_eq!(error_detail("Internal Server Error"), "Internal Server Error");
    }

    #[tokio::test]
    async fn test_unreachable_classifier() {
        let client = ModelClient::new("http://127.0.0.1:9", Duration::from_millis(500));
        let err = client.health().await.unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_GATEWAY);
    }
}
