//! Main refresh and draw cycle.
//!
//! Everything runs in one task. Snapshots are refreshed once per calendar
//! day and read once per frame, never at the same time, so the parsers need
//! no locking.

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::render::{Frame, Renderer};
use crate::sensor::SensorSource;
use crate::source::PayloadSource;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, Utc};
use panel_core::MemoryBudget;
use panel_feed::{FeedParser, SeriesExtractor};
use tracing::{debug, info};

/// Main application.
pub struct Application<S, R, T> {
    config: AppConfig,
    source: S,
    renderer: R,
    sensor: T,
    feed: FeedParser,
    series: SeriesExtractor,
    last_refresh_day: Option<NaiveDate>,
}

impl<S, R, T> Application<S, R, T>
where
    S: PayloadSource,
    R: Renderer,
    T: SensorSource,
{
    pub fn new(config: AppConfig, source: S, renderer: R, sensor: T) -> Self {
        let budget = config
            .memory
            .feed_budget_bytes
            .map_or(MemoryBudget::unbounded(), MemoryBudget::with_limit);
        let series = SeriesExtractor::new(config.instruments.len());

        Self {
            config,
            source,
            renderer,
            sensor,
            feed: FeedParser::with_budget(budget),
            series,
            last_refresh_day: None,
        }
    }

    /// Fetch and parse the feed, then every instrument in slot order.
    ///
    /// Instruments are fetched one at a time so only one series payload is
    /// held in memory.
    pub async fn refresh_all(&mut self) -> AppResult<()> {
        let payload = self.source.feed().await;
        self.feed.refresh(payload.as_deref());

        for (slot, instrument) in self.config.instruments.iter().enumerate() {
            let payload = self.source.series(&instrument.symbol).await;
            self.series.refresh(
                &instrument.symbol,
                payload.as_deref(),
                instrument.reference_cents().unwrap_or_default(),
                slot,
            )?;
        }

        Ok(())
    }

    /// Refresh when `today` differs from the day of the last refresh.
    pub async fn refresh_if_new_day(&mut self, now: DateTime<FixedOffset>) -> AppResult<bool> {
        let today = now.date_naive();
        if self.last_refresh_day == Some(today) {
            return Ok(false);
        }

        self.refresh_all().await?;
        self.last_refresh_day = Some(today);
        info!(
            at = %now.format("%Y-%m-%d %H:%M:%S"),
            items = self.feed.len(),
            instruments = self.series.slots(),
            "Updated feed and series data"
        );
        Ok(true)
    }

    /// Compose and draw one frame from the next item of each snapshot.
    pub fn draw(&mut self, now: DateTime<FixedOffset>) -> AppResult<()> {
        let frame = Frame {
            timestamp: now.format("%Y-%m-%d %H:%M").to_string(),
            sensor: self.sensor.read(),
            instrument: self.series.next(),
            item: self.feed.next(),
        };
        debug!(
            has_instrument = frame.instrument.is_some(),
            has_item = frame.item.is_some(),
            "Drawing frame"
        );
        self.renderer.draw(&frame)
    }

    /// One cycle: refresh if the day changed, then draw.
    pub async fn run_cycle(&mut self, now: DateTime<FixedOffset>) -> AppResult<()> {
        self.refresh_if_new_day(now).await?;
        self.draw(now)
    }

    /// Run cycles until Ctrl-C.
    pub async fn run(&mut self) -> AppResult<()> {
        let interval = self.config.draw_interval();
        info!(interval_secs = interval.as_secs(), "Starting draw loop");

        loop {
            self.run_cycle(self.now()).await?;

            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                signal = tokio::signal::ctrl_c() => {
                    signal?;
                    info!("Shutdown requested");
                    return Ok(());
                }
            }
        }
    }

    /// Current time in the configured zone.
    fn now(&self) -> DateTime<FixedOffset> {
        match self
            .config
            .display
            .utc_offset_hours
            .and_then(|hours| FixedOffset::east_opt(hours * 3600))
        {
            Some(offset) => Utc::now().with_timezone(&offset),
            None => {
                let local = Local::now();
                local.with_timezone(local.offset())
            }
        }
    }

    pub fn feed(&self) -> &FeedParser {
        &self.feed
    }

    pub fn series(&self) -> &SeriesExtractor {
        &self.series
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}
