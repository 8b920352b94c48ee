use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trendcast::{app, config::Config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trendcast=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!("Starting Trendcast server on {}", config.bind_addr());
    if config.alpha_vantage_api_key.is_none() {
        warn!("ALPHAVANTAGE_API_KEY not set; price history requests will fail");
    }
    info!("Using classifier at {}", config.model_api_url);

    let addr = config.bind_addr();
    let state = AppState::new(config);

    // Evict expired price history
    {
        let stock_service = state.stock_service.clone();
        let interval = state.config.cache_ttl().max(Duration::from_secs(60));
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                stock_service.purge_cache();
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Trendcast server listening on {}", addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
