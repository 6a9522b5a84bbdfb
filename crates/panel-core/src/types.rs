//! Records produced by the parsers and consumed by the renderer.

/// Number of daily closes kept per instrument.
pub const SERIES_CAPACITY: usize = 30;

/// Number of instrument slots the panel can display.
pub const MAX_INSTRUMENTS: usize = 8;

/// Maximum byte length of an instrument label.
pub const LABEL_MAX_LEN: usize = 14;

/// One news item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRecord {
    /// Decoded item title.
    pub title: String,
    /// Decoded item description, absent when the item has none.
    pub description: Option<String>,
}

impl FeedRecord {
    pub fn new(title: String, description: Option<String>) -> Self {
        Self { title, description }
    }
}

/// Price history and summary for one configured instrument.
///
/// Prices are integer cents, oldest first. Only the trailing `populated`
/// entries were written by the most recent refresh; anything before them is
/// left over from earlier refreshes of the same slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstrumentSnapshot {
    /// Display text, `"<symbol>: <latest close>"`.
    pub label: String,
    pub prices: [i64; SERIES_CAPACITY],
    /// Baseline supplied by configuration.
    pub reference_price: i64,
    pub min_price: i64,
    pub max_price: i64,
    /// Number of trailing `prices` entries written by the last refresh.
    pub populated: usize,
}

impl InstrumentSnapshot {
    /// Empty snapshot: no label, all-zero prices.
    pub fn new() -> Self {
        Self {
            label: String::new(),
            prices: [0; SERIES_CAPACITY],
            reference_price: 0,
            min_price: 0,
            max_price: 0,
            populated: 0,
        }
    }

    /// Prices written by the last refresh, oldest first.
    pub fn window(&self) -> &[i64] {
        &self.prices[SERIES_CAPACITY - self.populated.min(SERIES_CAPACITY)..]
    }

    /// Most recent close, if any row was read.
    pub fn latest(&self) -> Option<i64> {
        self.window().last().copied()
    }

    /// Latest close minus the reference price, in cents. `None` without a
    /// close or when the difference does not fit.
    pub fn change_from_reference(&self) -> Option<i64> {
        self.latest().and_then(|p| p.checked_sub(self.reference_price))
    }
}

impl Default for InstrumentSnapshot {
    fn default() -> Self {
        Self::new()
    }
}
