//! Core types for the e-paper information panel.
//!
//! This crate provides the building blocks shared by the parsers and the
//! application shell:
//! - `BoundedVec`: fixed-capacity owned container that never grows
//! - `ItemCursor`: round-robin read cursor for pull-based consumers
//! - `MemoryBudget`: byte allowance for fallible reservations
//! - `FeedRecord`, `InstrumentSnapshot`: the records handed to the renderer

pub mod bounded;
pub mod budget;
pub mod cursor;
pub mod error;
pub mod types;

pub use bounded::BoundedVec;
pub use budget::MemoryBudget;
pub use cursor::ItemCursor;
pub use error::{CoreError, CoreResult};
pub use types::{FeedRecord, InstrumentSnapshot, LABEL_MAX_LEN, MAX_INSTRUMENTS, SERIES_CAPACITY};
