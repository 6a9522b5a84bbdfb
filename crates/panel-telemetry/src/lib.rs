//! Structured logging for the e-paper panel.
//!
//! JSON lines on the device (`RUST_ENV=production`), pretty output on a
//! development host.

pub mod error;
pub mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{init_logging, LogFormat};
