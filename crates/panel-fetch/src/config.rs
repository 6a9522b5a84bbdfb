//! Fetch configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Endpoints and transport settings for both payload kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// News feed URL.
    #[serde(default = "default_feed_url")]
    pub feed_url: String,
    /// `Accept` header sent with the feed request.
    #[serde(default = "default_feed_accept")]
    pub feed_accept: String,
    /// Daily series endpoint; query parameters are appended per symbol.
    #[serde(default = "default_series_base_url")]
    pub series_base_url: String,
    /// Series API key.
    #[serde(default)]
    pub api_key: String,
    /// Per-request timeout (ms). Default: 5000.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_feed_url() -> String {
    "https://www.channelnewsasia.com/api/v1/rss-outbound-feed?_format=xml&category=10416"
        .to_string()
}

fn default_feed_accept() -> String {
    "application/rss+xml".to_string()
}

fn default_series_base_url() -> String {
    "https://www.alphavantage.co/query".to_string()
}

fn default_timeout_ms() -> u64 {
    5_000
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            feed_url: default_feed_url(),
            feed_accept: default_feed_accept(),
            series_base_url: default_series_base_url(),
            api_key: String::new(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: FetchConfig = toml::from_str(r#"api_key = "demo""#).unwrap();
        assert_eq!(config.api_key, "demo");
        assert_eq!(config.feed_accept, "application/rss+xml");
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }
}
