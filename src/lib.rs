//! Trendcast - stock trend prediction from monthly price history

pub mod api;
pub mod config;
pub mod error;
pub mod features;
pub mod services;
pub mod sources;
pub mod types;

use std::sync::Arc;

use axum::Router;
use config::Config;
use services::StockService;
use sources::{AlphaVantageClient, ModelClient};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub stock_service: Arc<StockService>,
}

impl AppState {
    /// Wire up clients and services from configuration.
    pub fn new(config: Config) -> Self {
        let timeout = config.http_timeout();
        let alpha_vantage = Arc::new(AlphaVantageClient::new(
            config.alpha_vantage_api_key.clone(),
            config.alpha_vantage_url.clone(),
            timeout,
        ));
        let model = Arc::new(ModelClient::new(config.model_api_url.clone(), timeout));
        let stock_service = StockService::new(&config, alpha_vantage, model);

        Self {
            config: Arc::new(config),
            stock_service,
        }
    }
}

/// Build the HTTP application.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub use features::{extract_features, FeatureError, FeatureVector};
