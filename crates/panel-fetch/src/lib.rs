//! HTTP payload fetching for the e-paper panel.
//!
//! Downloads the news feed and per-instrument daily series as raw text. The
//! parsers never see transport details; a failed fetch reaches them as an
//! absent payload.

pub mod client;
pub mod config;
pub mod error;

pub use client::PayloadClient;
pub use config::FetchConfig;
pub use error::{FetchError, FetchResult};
