//! Text extraction for the e-paper panel.
//!
//! Turns raw payloads handed over by the fetch layer into bounded snapshots:
//! - `scanner`: tag-pair location with a caller-owned cursor
//! - `entity`: fixed-table entity decoding
//! - `feed`: news item snapshot from a markup feed
//! - `series`: daily close series from a CSV time series

pub mod entity;
pub mod error;
pub mod feed;
pub mod scanner;
pub mod series;

pub use error::{FeedError, FeedResult};
pub use feed::{FeedParser, FEED_CAPACITY};
pub use scanner::{scan, ScanOutcome, TagCursor, TagPair};
pub use series::SeriesExtractor;
