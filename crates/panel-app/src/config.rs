//! Application configuration.

use crate::error::{AppError, AppResult};
use panel_core::MAX_INSTRUMENTS;
use panel_fetch::FetchConfig;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable overriding `fetch.api_key`.
pub const API_KEY_ENV: &str = "PANEL_API_KEY";

/// One instrument shown on the panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentConfig {
    /// Ticker symbol as understood by the series endpoint (e.g., "AAPL").
    pub symbol: String,
    /// Baseline price the chart is compared against, in currency units.
    pub reference_price: Decimal,
}

impl InstrumentConfig {
    /// Reference price in integer cents, truncated. `None` when out of range.
    pub fn reference_cents(&self) -> Option<i64> {
        self.reference_price
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.trunc().to_i64())
    }
}

/// Display timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Time between two frames (seconds). Default: 900 (15 minutes).
    #[serde(default = "default_draw_interval_secs")]
    pub draw_interval_secs: u64,
    /// Fixed UTC offset (hours) used for the date line and the daily
    /// refresh. Uses the host's local time when unset.
    #[serde(default)]
    pub utc_offset_hours: Option<i32>,
}

fn default_draw_interval_secs() -> u64 {
    900
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            draw_interval_secs: default_draw_interval_secs(),
            utc_offset_hours: None,
        }
    }
}

/// Memory limits for parsed snapshots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Bytes the news snapshot may hold. Unbounded when unset.
    #[serde(default)]
    pub feed_budget_bytes: Option<usize>,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub memory: MemoryConfig,
    #[serde(default)]
    pub instruments: Vec<InstrumentConfig>,
}

impl AppConfig {
    /// Load and validate configuration from a TOML file.
    ///
    /// `PANEL_API_KEY`, when set, replaces the configured API key.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        let mut config = Self::from_toml(&content)?;
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            config.fetch.api_key = key;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    /// Validate configuration values.
    pub fn validate(&self) -> AppResult<()> {
        if self.instruments.is_empty() {
            return Err(AppError::Config("No instruments configured".to_string()));
        }
        if self.instruments.len() > MAX_INSTRUMENTS {
            return Err(AppError::Config(format!(
                "{} instruments configured, at most {MAX_INSTRUMENTS} supported",
                self.instruments.len()
            )));
        }
        if let Some(empty) = self.instruments.iter().position(|i| i.symbol.trim().is_empty()) {
            return Err(AppError::Config(format!(
                "Instrument {empty} has an empty symbol"
            )));
        }
        if let Some(bad) = self.instruments.iter().find(|i| i.reference_cents().is_none()) {
            return Err(AppError::Config(format!(
                "Instrument {} reference_price ({}) is out of range",
                bad.symbol, bad.reference_price
            )));
        }
        if self.display.draw_interval_secs == 0 {
            return Err(AppError::Config(
                "display.draw_interval_secs must be positive".to_string(),
            ));
        }
        if let Some(hours) = self.display.utc_offset_hours {
            if !(-12..=14).contains(&hours) {
                return Err(AppError::Config(format!(
                    "display.utc_offset_hours ({hours}) must be within -12..=14"
                )));
            }
        }
        Ok(())
    }

    pub fn draw_interval(&self) -> Duration {
        Duration::from_secs(self.display.draw_interval_secs)
    }
}
