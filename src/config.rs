use std::env;
use std::time::Duration;

/// Default Alpha Vantage query endpoint.
pub const DEFAULT_ALPHAVANTAGE_URL: &str = "https://www.alphavantage.co/query";

/// Longest history window accepted from `HISTORY_YEARS`.
pub const MAX_HISTORY_YEARS: u32 = 100;

/// Default classifier API base URL.
pub const DEFAULT_MODEL_API_URL: &str = "http://localhost:8000";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Alpha Vantage API key for monthly price history.
    pub alpha_vantage_api_key: Option<String>,
    /// Alpha Vantage query endpoint.
    pub alpha_vantage_url: String,
    /// Base URL of the trend classifier API.
    pub model_api_url: String,
    /// Years of monthly history kept per symbol.
    pub history_years: u32,
    /// How long fetched price history stays cached (seconds).
    pub cache_ttl_secs: u64,
    /// Timeout for outbound HTTP requests (seconds).
    pub http_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            alpha_vantage_api_key: env::var("ALPHAVANTAGE_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            alpha_vantage_url: env::var("ALPHAVANTAGE_URL")
                .unwrap_or_else(|_| DEFAULT_ALPHAVANTAGE_URL.to_string()),
            model_api_url: env::var("MODEL_API_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_MODEL_API_URL.to_string()),
            history_years: parse_history_years(env::var("HISTORY_YEARS").ok().as_deref()),
            cache_ttl_secs: env::var("CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            alpha_vantage_api_key: None,
            alpha_vantage_url: DEFAULT_ALPHAVANTAGE_URL.to_string(),
            model_api_url: DEFAULT_MODEL_API_URL.to_string(),
            history_years: 5,
            cache_ttl_secs: 3600,
            http_timeout_secs: 30,
        }
    }
}

/// Parse `HISTORY_YEARS`, clamped to `1..=MAX_HISTORY_YEARS`. Defaults to 5.
fn parse_history_years(value: Option<&str>) -> u32 {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .map(|years| years.clamp(1, MAX_HISTORY_YEARS))
        .unwrap_or(5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_values() {
        let config = Config::default();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.alpha_vantage_api_key, None);
        assert_eq!(config.model_api_url, "http://localhost:8000");
        assert_eq!(config.history_years, 5);
        assert_eq!(config.cache_ttl(), Duration::from_secs(3600));
        assert_eq!(config.http_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_parse_history_years() {
        assert_eq!(parse_history_years(None), 5);
        assert_eq!(parse_history_years(Some("10")), 10);
        assert_eq!(parse_history_years(Some("0")), 1);
        assert_eq!(parse_history_years(Some("4294967295")), MAX_HISTORY_YEARS);
        assert_eq!(parse_history_years(Some("-3")), 5);
        assert_eq!(parse_history_years(Some("lots")), 5);
    }

    #[test]
    fn test_bind_addr() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..Config::default()
        };
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_config_clone() {
        let config = Config {
            alpha_vantage_api_key: Some("demo".to_string()),
            model_api_url: "http://ml:8000".to_string(),
            ..Config::default()
        };

        let cloned = config.clone();
        assert_eq!(cloned.alpha_vantage_api_key, config.alpha_vantage_api_key);
        assert_eq!(cloned.model_api_url, config.model_api_url);
    }
}
