//! Byte allowance for snapshot storage.
//!
//! The panel runs with a small heap. Every owned buffer a snapshot
//! generation keeps is charged here before it is reserved, so a generation
//! that would not fit is cut short instead of exhausting the allocator.
//! Exceeding the allowance is reported exactly like a failed allocation.

use crate::error::{CoreError, CoreResult};
use tracing::debug;

/// Tracks bytes held against an optional limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoryBudget {
    limit: Option<usize>,
    used: usize,
}

impl MemoryBudget {
    /// Budget without a limit; charges are still counted.
    pub const fn unbounded() -> Self {
        Self {
            limit: None,
            used: 0,
        }
    }

    pub const fn with_limit(bytes: usize) -> Self {
        Self {
            limit: Some(bytes),
            used: 0,
        }
    }

    /// Charge `bytes` against the budget.
    pub fn try_charge(&mut self, bytes: usize) -> CoreResult<()> {
        if let Some(limit) = self.limit {
            let available = limit.saturating_sub(self.used);
            if bytes > available {
                debug!(requested = bytes, available, "Memory budget exhausted");
                return Err(CoreError::BudgetExhausted {
                    requested: bytes,
                    available,
                });
            }
        }
        self.used += bytes;
        Ok(())
    }

    /// Give back bytes previously charged.
    pub fn release(&mut self, bytes: usize) {
        self.used = self.used.saturating_sub(bytes);
    }

    /// Release everything charged so far.
    pub fn release_all(&mut self) {
        self.used = 0;
    }

    #[inline]
    pub fn used(&self) -> usize {
        self.used
    }
}
