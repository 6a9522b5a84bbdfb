//! E-paper information panel - entry point.

use anyhow::Result;
use clap::Parser;
use panel_app::{AppConfig, Application, LogRenderer, NullSensor};
use panel_fetch::PayloadClient;
use tracing::info;

/// E-paper news and market panel
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via PANEL_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    panel_telemetry::init_logging()?;

    info!("Starting epd-panel v{}", env!("CARGO_PKG_VERSION"));

    // CLI arg > PANEL_CONFIG env var > default
    let config_path = args
        .config
        .or_else(|| std::env::var("PANEL_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    info!(config_path = %config_path, "Loading configuration");
    let config = AppConfig::from_file(&config_path)?;
    info!(
        instruments = config.instruments.len(),
        feed_url = %config.fetch.feed_url,
        "Configuration loaded"
    );

    let client = PayloadClient::new(config.fetch.clone())?;
    let mut app = Application::new(config, client, LogRenderer::default(), NullSensor);
    app.run().await?;

    info!("Panel stopped");
    Ok(())
}
