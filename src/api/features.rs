//! Feature extraction endpoint for callers that already hold a price series.

use axum::{routing::post, Json, Router};
use serde::Deserialize;

use super::ApiResponse;
use crate::error::Result;
use crate::features::{extract_features, FeatureVector};
use crate::AppState;

/// Closing prices, oldest first.
#[derive(Debug, Deserialize)]
pub struct FeaturesRequest {
    pub prices: Vec<f64>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/features", post(compute_features))
}

async fn compute_features(
    Json(request): Json<FeaturesRequest>,
) -> Result<Json<ApiResponse<FeatureVector>>> {
    let features = extract_features(&request.prices)?;
    Ok(Json(ApiResponse::new(features)))
}
