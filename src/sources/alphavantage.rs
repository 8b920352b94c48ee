//! Alpha Vantage API client for monthly stock history.
//!
//! Note: the free tier is heavily rate limited (25 requests/day, 5/minute).
//! Limit hits come back as HTTP 200 with a "Note" or "Information" message
//! instead of data.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::types::PricePoint;

const MONTHLY_SERIES_KEY: &str = "Monthly Time Series";
const CLOSE_KEY: &str = "4. close";

/// Alpha Vantage API client.
pub struct AlphaVantageClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl AlphaVantageClient {
    /// Create a new Alpha Vantage client.
    pub fn new(api_key: Option<String>, base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .user_agent("Trendcast/1.0")
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetch every monthly close Alpha Vantage has for `symbol`, oldest first.
    pub async fn get_monthly_closes(&self, symbol: &str) -> Result<Vec<PricePoint>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Internal("ALPHAVANTAGE_API_KEY is not set".to_string()))?;

        debug!("Fetching monthly series for {}", symbol);
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("function", "TIME_SERIES_MONTHLY"),
                ("symbol", symbol),
                ("apikey", api_key),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "Alpha Vantage returned {}",
                response.status()
            )));
        }

        let body: Value = response.json().await?;
        parse_monthly_response(body)
    }
}

/// Extract monthly closes from a `TIME_SERIES_MONTHLY` response body.
pub fn parse_monthly_response(body: Value) -> Result<Vec<PricePoint>> {
    if let Some(note) = body.get("Note").or_else(|| body.get("Information")) {
        return Err(AppError::RateLimited(
            note.as_str().unwrap_or("API limit reached").to_string(),
        ));
    }
    if body.get("Error Message").is_some() {
        return Err(AppError::InvalidSymbol("Invalid symbol".to_string()));
    }

    let series = match body.get(MONTHLY_SERIES_KEY).and_then(Value::as_object) {
        Some(series) => series,
        None => return Err(AppError::NotFound("Data not found".to_string())),
    };

    let mut points: Vec<PricePoint> = series
        .iter()
        .filter_map(|(date_str, entry)| {
            let date = match NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
                Ok(date) => date,
                Err(e) => {
                    warn!("Skipping entry with bad date {:?}: {}", date_str, e);
                    return None;
                }
            };
            match entry.get(CLOSE_KEY).and_then(parse_close) {
                Some(close) => Some(PricePoint { date, close }),
                None => {
                    warn!("Skipping {} with bad close {:?}", date_str, entry.get(CLOSE_KEY));
                    None
                }
            }
        })
        .collect();

    // Sort by date ascending
    points.sort_by_key(|p| p.date);

    Ok(points)
}

/// Closes normally arrive as strings like `"171.4800"`; bare numbers are accepted too.
fn parse_close(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}
