use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    /// Whether an Alpha Vantage key is configured.
    price_api_configured: bool,
    model_api_url: String,
}

/// Liveness of this server only; the classifier has its own check.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        price_api_configured: state.stock_service.price_api_configured(),
        model_api_url: state.stock_service.model().base_url().to_string(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "ok",
            version: "1.0.0",
            price_api_configured: false,
            model_api_url: "http://localhost:8000".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("\"priceApiConfigured\":false"));
        assert!(json.contains("\"modelApiUrl\":\"http://localhost:8000\""));
    }

    #[tokio::test]
    async fn test_health_handler() {
        let state = AppState::new(Config {
            alpha_vantage_api_key: Some("demo".to_string()),
            ..Config::default()
        });
        let Json(response) = health(State(state)).await;
        assert_eq!(response.status, "ok");
        assert_eq!(response.version, env!("CARGO_PKG_VERSION"));
        assert!(response.price_api_configured);
        assert_eq!(response.model_api_url, "http://localhost:8000");
    }
}
