//! Error types for panel-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Capacity exceeded: container holds at most {capacity} items")]
    CapacityExceeded { capacity: usize },

    #[error("Memory budget exhausted: requested {requested} bytes, {available} available")]
    BudgetExhausted { requested: usize, available: usize },

    #[error("Allocation failed for {0} bytes")]
    Allocation(usize),
}

/// Result type alias for core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;
