//! Pass-through to the classifier's status endpoints.

use axum::{extract::State, routing::get, Json, Router};

use super::ApiResponse;
use crate::error::Result;
use crate::types::{ModelHealth, ModelInfo};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/model/health", get(model_health))
        .route("/api/model/info", get(model_info))
}

async fn model_health(State(state): State<AppState>) -> Result<Json<ApiResponse<ModelHealth>>> {
    let health = state.stock_service.model().health().await?;
    Ok(Json(ApiResponse::new(health)))
}

async fn model_info(State(state): State<AppState>) -> Result<Json<ApiResponse<ModelInfo>>> {
    let info = state.stock_service.model().model_info().await?;
    Ok(Json(ApiResponse::new(info)))
}
