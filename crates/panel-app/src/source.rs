//! Payload source seam between the cycle and the network.

use async_trait::async_trait;
use panel_fetch::PayloadClient;
use tracing::warn;

/// Supplies raw payloads. `None` means the fetch failed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PayloadSource: Send + Sync {
    /// Markup news feed.
    async fn feed(&self) -> Option<String>;

    /// Daily series CSV for one symbol.
    async fn series(&self, symbol: &str) -> Option<String>;
}

#[async_trait]
impl PayloadSource for PayloadClient {
    async fn feed(&self) -> Option<String> {
        self.fetch_feed()
            .await
            .map_err(|e| warn!(error = %e, "Feed fetch failed"))
            .ok()
    }

    async fn series(&self, symbol: &str) -> Option<String> {
        self.fetch_series(symbol)
            .await
            .map_err(|e| warn!(error = %e, symbol, "Series fetch failed"))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_fetch::FetchConfig;

    #[test]
    fn test_client_errors_become_none() {
        let client = PayloadClient::new(FetchConfig {
            feed_url: "not a url".to_string(),
            series_base_url: "also not a url".to_string(),
            ..FetchConfig::default()
        })
        .unwrap();

        assert_eq!(tokio_test::block_on(client.feed()), None);
        assert_eq!(tokio_test::block_on(client.series("IBM")), None);
    }
}
