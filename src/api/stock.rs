//! Stock history, features, prediction and decomposition endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::ApiResponse;
use crate::error::{AppError, Result};
use crate::features::{DecompositionPoint, FeatureVector};
use crate::services::normalize_symbol;
use crate::types::{stock_label, ChartPoint, PredictionView, StockOption, AVAILABLE_STOCKS};
use crate::AppState;

/// Query parameters for the history endpoint.
#[derive(Debug, Deserialize)]
pub struct StockQuery {
    pub symbol: Option<String>,
}

/// Price history response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub symbol: String,
    pub label: String,
    pub current_price: Option<f64>,
    pub prices: Vec<ChartPoint>,
}

/// Decomposition response.
#[derive(Debug, Serialize)]
pub struct DecompositionResponse {
    pub symbol: String,
    pub data: Vec<DecompositionPoint>,
}

/// Create the stock router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/stocks", get(list_stocks))
        .route("/api/stock", get(get_history))
        .route("/api/stock/:symbol/features", get(get_features))
        .route("/api/stock/:symbol/prediction", get(get_prediction))
        .route("/api/stock/:symbol/decomposition", get(get_decomposition))
}

/// Stocks offered in the selector.
async fn list_stocks() -> Json<ApiResponse<Vec<StockOption>>> {
    Json(ApiResponse::new(AVAILABLE_STOCKS.to_vec()))
}

/// Monthly price history for `?symbol=`.
async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<StockQuery>,
) -> Result<Json<ApiResponse<HistoryResponse>>> {
    let symbol = query
        .symbol
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("Symbol not provided".to_string()))?;
    let symbol = normalize_symbol(symbol)?;

    let cached = state.stock_service.is_cached(&symbol);
    let series = state.stock_service.history(&symbol).await?;

    Ok(Json(ApiResponse::with_cached(
        HistoryResponse {
            label: stock_label(&symbol).to_string(),
            symbol,
            current_price: series.current_price(),
            prices: series.chart_points(),
        },
        cached,
    )))
}

/// Classifier features for a symbol.
async fn get_features(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<ApiResponse<FeatureVector>>> {
    let symbol = normalize_symbol(&symbol)?;
    let cached = state.stock_service.is_cached(&symbol);
    let features = state.stock_service.features(&symbol).await?;
    Ok(Json(ApiResponse::with_cached(features, cached)))
}

/// Trend prediction for a symbol.
async fn get_prediction(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<ApiResponse<PredictionView>>> {
    let symbol = normalize_symbol(&symbol)?;
    let cached = state.stock_service.is_cached(&symbol);
    let prediction = state.stock_service.predict(&symbol).await?;
    Ok(Json(ApiResponse::with_cached(prediction, cached)))
}

/// Trend, noise and volatility for a symbol.
async fn get_decomposition(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<ApiResponse<DecompositionResponse>>> {
    let symbol = normalize_symbol(&symbol)?;
    let cached = state.stock_service.is_cached(&symbol);
    let data = state.stock_service.decomposition(&symbol).await?;
    Ok(Json(ApiResponse::with_cached(
        DecompositionResponse { symbol, data },
        cached,
    )))
}
