//! E-paper information panel.
//!
//! Orchestrates one cooperative cycle:
//! - Daily refresh of the news feed and every configured instrument
//! - One frame per draw interval, pulling the next news item and the next
//!   instrument round-robin
//! - Sensor sampling and display output through collaborator traits

pub mod app;
pub mod config;
pub mod error;
pub mod render;
pub mod sensor;
pub mod source;

pub use app::Application;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use render::{Frame, LogRenderer, Renderer};
pub use sensor::{NullSensor, SensorReading, SensorSource};
pub use source::PayloadSource;
