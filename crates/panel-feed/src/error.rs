//! Feed error types.

use panel_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeedError {
    #[error("Storage exhausted: {0}")]
    Storage(#[from] CoreError),

    #[error("Instrument slot {slot} out of range ({slots} configured)")]
    SlotOutOfRange { slot: usize, slots: usize },
}

pub type FeedResult<T> = Result<T, FeedError>;
