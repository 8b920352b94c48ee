//! Stock history, features and predictions for the dashboard.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::features::{decompose, extract_features, DecompositionPoint, FeatureVector};
use crate::services::projection;
use crate::services::SymbolCache;
use crate::sources::{AlphaVantageClient, ModelClient};
use crate::types::{history_start, PredictResponse, PredictionView, PriceSeries};

/// Longest ticker accepted.
const MAX_SYMBOL_LEN: usize = 10;

/// Upper-case and validate a ticker symbol.
pub fn normalize_symbol(symbol: &str) -> Result<String> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(AppError::BadRequest("Symbol not provided".to_string()));
    }
    if symbol.len() > MAX_SYMBOL_LEN
        || !symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(AppError::InvalidSymbol(format!("Invalid symbol: {}", symbol)));
    }
    Ok(symbol.to_uppercase())
}

/// Fetches and caches monthly history and runs it through the feature
/// extractor and classifier.
pub struct StockService {
    alpha_vantage: Arc<AlphaVantageClient>,
    model: Arc<ModelClient>,
    cache: SymbolCache<PriceSeries>,
    history_years: u32,
}

impl StockService {
    pub fn new(
        config: &Config,
        alpha_vantage: Arc<AlphaVantageClient>,
        model: Arc<ModelClient>,
    ) -> Arc<Self> {
        Arc::new(Self {
            alpha_vantage,
            model,
            cache: SymbolCache::new(config.cache_ttl()),
            history_years: config.history_years,
        })
    }

    pub fn model(&self) -> &ModelClient {
        &self.model
    }

    /// Whether price history can be fetched at all.
    pub fn price_api_configured(&self) -> bool {
        self.alpha_vantage.has_api_key()
    }

    /// Whether history for `symbol` would be served from cache.
    pub fn is_cached(&self, symbol: &str) -> bool {
        self.cache.get(symbol).is_some()
    }

    /// Drop expired cache entries.
    pub fn purge_cache(&self) {
        self.cache.purge_expired();
    }

    fn window_start(&self) -> NaiveDate {
        history_start(Utc::now().date_naive(), self.history_years)
    }

    /// Monthly closes over the configured trailing window.
    pub async fn history(&self, symbol: &str) -> Result<PriceSeries> {
        let symbol = normalize_symbol(symbol)?;
        if let Some(series) = self.cache.get(&symbol) {
            debug!("History cache hit for {}", symbol);
            return Ok(series);
        }

        let closes = self.alpha_vantage.get_monthly_closes(&symbol).await?;
        let series = PriceSeries::from_closes(&symbol, closes, self.window_start());
        if series.is_empty() {
            return Err(AppError::NotFound(format!(
                "No prices for {} in the last {} years",
                symbol, self.history_years
            )));
        }

        info!("Loaded {} monthly closes for {}", series.len(), symbol);
        self.cache.insert(&symbol, series.clone());
        Ok(series)
    }

    /// Classifier features for the current history of `symbol`.
    pub async fn features(&self, symbol: &str) -> Result<FeatureVector> {
        let series = self.history(symbol).await?;
        Ok(extract_features(&series.prices())?)
    }

    /// Trend prediction with chart overlay.
    pub async fn predict(&self, symbol: &str) -> Result<PredictionView> {
        let series = self.history(symbol).await?;
        let features = extract_features(&series.prices())?;
        let response = self.model.predict(&features).await?;

        info!(
            "Prediction for {}: {} (p_up={:.4}, confidence={:.4})",
            series.symbol(),
            response.prediction_label,
            response.probability_up,
            response.confidence
        );

        Ok(build_view(&series, &response))
    }

    /// Trend/noise/volatility split of the current history.
    pub async fn decomposition(&self, symbol: &str) -> Result<Vec<DecompositionPoint>> {
        let series = self.history(symbol).await?;
        Ok(decompose(series.points()))
    }
}

/// Combine a classifier response with the series it was computed from.
pub fn build_view(series: &PriceSeries, response: &PredictResponse) -> PredictionView {
    PredictionView {
        symbol: series.symbol().to_string(),
        prediction: response.prediction,
        label: response.prediction_label.clone(),
        direction: response.direction(),
        probability_up: response.probability_up,
        probability_down: response.probability_down,
        confidence_pct: projection::confidence_pct(response.confidence),
        current_price: series.current_price().unwrap_or_default(),
        overlay: projection::project(series.points(), response.probability_up),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PricePoint, TrendDirection};
    use chrono::Months;

    fn series(count: usize) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2021, 1, 31).unwrap();
        let points = (0..count).map(|i| PricePoint {
            date: start.checked_add_months(Months::new(i as u32)).unwrap(),
            close: 100.0 + i as f64,
        });
        PriceSeries::from_closes("aapl", points, start)
    }

    #[test]
    fn test_normalize_symbol() {
        assert_eq!(normalize_symbol(" aapl ").unwrap(), "AAPL");
        assert_eq!(normalize_symbol("brk.b").unwrap(), "BRK.B");
        assert!(matches!(normalize_symbol(""), Err(AppError::BadRequest(_))));
        assert!(matches!(
            normalize_symbol("AAPL&apikey=x"),
            Err(AppError::InvalidSymbol(_))
        ));
        assert!(matches!(
            normalize_symbol("ABCDEFGHIJK"),
            Err(AppError::InvalidSymbol(_))
        ));
    }

    #[test]
    fn test_build_view() {
        let series = series(60);
        let response = PredictResponse {
            prediction: 1,
            prediction_label: "Sobe".to_string(),
            probability_up: 0.6312,
            probability_down: 0.3688,
            confidence: 0.6312,
        };

        let view = build_view(&series, &response);
        assert_eq!(view.symbol, "AAPL");
        assert_eq!(view.direction, TrendDirection::Up);
        assert_eq!(view.confidence_pct, 63);
        assert_eq!(view.current_price, 159.0);
        assert_eq!(view.overlay.len(), 12);
    }

    #[tokio::test]
    async fn test_history_without_api_key_fails() {
        let config = Config::default();
        let service = StockService::new(
            &config,
            Arc::new(AlphaVantageClient::new(
                None,
                config.alpha_vantage_url.clone(),
                config.http_timeout(),
            )),
            Arc::new(ModelClient::new(config.model_api_url.clone(), config.http_timeout())),
        );

        assert!(!service.price_api_configured());
        assert!(!service.is_cached("AAPL"));
        assert!(matches!(
            service.history("AAPL").await,
            Err(AppError::Internal(_))
        ));
        assert!(matches!(
            service.features("").await,
            Err(AppError::BadRequest(_))
        ));
    }
}
