//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Fetch error: {0}")]
    Fetch(#[from] panel_fetch::FetchError),

    #[error("Feed error: {0}")]
    Feed(#[from] panel_feed::FeedError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] panel_telemetry::TelemetryError),

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
