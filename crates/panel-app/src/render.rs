//! Frame composition and the display collaborator.

use crate::error::AppResult;
use crate::sensor::SensorReading;
use panel_core::{FeedRecord, InstrumentSnapshot};
use rust_decimal::Decimal;
use tracing::info;

/// Everything drawn in one display refresh.
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    /// `%Y-%m-%d %H:%M` in the panel's time zone.
    pub timestamp: String,
    pub sensor: Option<SensorReading>,
    pub instrument: Option<&'a InstrumentSnapshot>,
    pub item: Option<&'a FeedRecord>,
}

/// Display output. Implementations own the panel transport.
pub trait Renderer: Send {
    fn draw(&mut self, frame: &Frame<'_>) -> AppResult<()>;
}

/// Integer cents as a fixed two-decimal string.
pub fn format_cents(cents: i64) -> String {
    Decimal::new(cents, 2).to_string()
}

/// Writes each frame to the log instead of a display.
#[derive(Debug, Default)]
pub struct LogRenderer {
    frames: u64,
}

impl Renderer for LogRenderer {
    fn draw(&mut self, frame: &Frame<'_>) -> AppResult<()> {
        self.frames += 1;

        if let Some(reading) = frame.sensor {
            info!(
                temperature_c = reading.temperature_c,
                humidity_pct = reading.humidity_pct,
                "Sensor"
            );
        }

        if let Some(snapshot) = frame.instrument {
            let latest = snapshot.latest().map(format_cents).unwrap_or_default();
            let change = snapshot
                .change_from_reference()
                .map(format_cents)
                .unwrap_or_default();
            info!(
                label = %snapshot.label,
                latest = %latest,
                change = %change,
                low = %format_cents(snapshot.min_price),
                high = %format_cents(snapshot.max_price),
                points = snapshot.populated,
                "Chart"
            );
        }

        if let Some(item) = frame.item {
            info!(
                title = %item.title,
                description = item.description.as_deref().unwrap_or(""),
                "Headline"
            );
        }

        info!(frame = self.frames, timestamp = %frame.timestamp, "Frame drawn");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(350), "3.50");
        assert_eq!(format_cents(-5), "-0.05");
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(1_234_567), "12345.67");
    }

    #[test]
    fn test_log_renderer_counts_frames() {
        let mut renderer = LogRenderer::default();
        let record = FeedRecord::new("Title".to_string(), None);
        let frame = Frame {
            timestamp: "2024-05-03 08:00".to_string(),
            sensor: None,
            instrument: None,
            item: Some(&record),
        };
        renderer.draw(&frame).unwrap();
        renderer.draw(&frame).unwrap();
        assert_eq!(renderer.frames, 2);
    }
}
