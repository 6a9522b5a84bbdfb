//! HTTP client for the news feed and the daily series endpoint.
//!
//! Redirects are not followed: a redirect from either service means the
//! endpoint moved or the request was rejected, and is reported as a status
//! error like any other non-success answer.

use crate::config::FetchConfig;
use crate::error::{FetchError, FetchResult};
use reqwest::header::ACCEPT;
use reqwest::{redirect, Client, Url};
use tracing::{debug, info};

/// Fetches raw payload text.
pub struct PayloadClient {
    client: Client,
    config: FetchConfig,
}

impl PayloadClient {
    pub fn new(config: FetchConfig) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| FetchError::HttpClient(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Download the news feed.
    pub async fn fetch_feed(&self) -> FetchResult<String> {
        let url = Url::parse(&self.config.feed_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {e}", self.config.feed_url)))?;
        info!(url = %url, "Fetching news feed");
        self.get_text(url, Some(&self.config.feed_accept)).await
    }

    /// Download the daily series CSV for `symbol`.
    pub async fn fetch_series(&self, symbol: &str) -> FetchResult<String> {
        let url = self.series_url(symbol)?;
        // The URL carries the API key, keep it out of the log
        info!(symbol, "Fetching daily series");
        self.get_text(url, None).await
    }

    /// Series request URL for `symbol`.
    pub fn series_url(&self, symbol: &str) -> FetchResult<Url> {
        Url::parse_with_params(
            &self.config.series_base_url,
            &[
                ("function", "TIME_SERIES_DAILY"),
                ("symbol", symbol),
                ("apikey", self.config.api_key.as_str()),
                ("datatype", "csv"),
            ],
        )
        .map_err(|e| FetchError::InvalidUrl(format!("{}: {e}", self.config.series_base_url)))
    }

    async fn get_text(&self, url: Url, accept: Option<&str>) -> FetchResult<String> {
        let mut request = self.client.get(url.clone());
        if let Some(accept) = accept {
            request = request.header(ACCEPT, accept);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::HttpClient(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: redact(&url),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;

        debug!(bytes = body.len(), "HTTP response received");
        Ok(body)
    }
}

/// URL without its query string, safe to log.
fn redact(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}
