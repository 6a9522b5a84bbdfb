//! Daily close series extraction.
//!
//! The quote service returns one CSV per instrument, newest row first:
//!
//! ```text
//! timestamp,open,high,low,close,volume
//! 2024-05-03,182.10,185.00,181.50,183.38,1630000
//! 2024-05-02,...
//! ```
//!
//! The `close` column is located by its header text and read from every data
//! row. Row `r` lands at `prices[SERIES_CAPACITY - 1 - r]` so the stored
//! series is oldest first. Only the first `SERIES_CAPACITY` rows are used.
//!
//! A refresh with fewer rows than `SERIES_CAPACITY` only overwrites the
//! trailing entries; the leading ones still hold whatever the previous
//! refresh of the same slot wrote. `InstrumentSnapshot::window` exposes just
//! the entries written by the latest refresh.

use crate::error::{FeedError, FeedResult};
use panel_core::{InstrumentSnapshot, ItemCursor, LABEL_MAX_LEN, MAX_INSTRUMENTS, SERIES_CAPACITY};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Header text of the price column.
pub const CLOSE_COLUMN: &str = "close";

/// Longest price text read from a field.
pub const PRICE_TEXT_MAX: usize = 10;

/// Per-instrument snapshots indexed by configuration slot.
#[derive(Debug)]
pub struct SeriesExtractor {
    snapshots: Box<[InstrumentSnapshot]>,
    cursor: ItemCursor,
}

impl SeriesExtractor {
    /// Create `slots` empty snapshots, at most `MAX_INSTRUMENTS`.
    pub fn new(slots: usize) -> Self {
        if slots > MAX_INSTRUMENTS {
            warn!(
                slots,
                max = MAX_INSTRUMENTS,
                "Too many instrument slots requested, truncating"
            );
        }
        let slots = slots.min(MAX_INSTRUMENTS);
        Self {
            snapshots: vec![InstrumentSnapshot::new(); slots].into_boxed_slice(),
            cursor: ItemCursor::new(),
        }
    }

    /// Update the snapshot at `slot` from one instrument's CSV payload.
    ///
    /// `None` means the fetch failed and the slot is left untouched. A payload
    /// without a `close` column only records `reference_price`. Errors only
    /// for a slot outside the configured range.
    pub fn refresh(
        &mut self,
        symbol: &str,
        payload: Option<&str>,
        reference_price: i64,
        slot: usize,
    ) -> FeedResult<()> {
        let slots = self.snapshots.len();
        let snapshot = self
            .snapshots
            .get_mut(slot)
            .ok_or(FeedError::SlotOutOfRange { slot, slots })?;

        let Some(payload) = payload else {
            warn!(symbol, slot, "No series payload, keeping previous snapshot");
            return Ok(());
        };

        let (header, body) = payload.split_once('\n').unwrap_or((payload, ""));

        let Some(column) = find_column(header, CLOSE_COLUMN) else {
            warn!(symbol, header = %header.trim_end(), "No close column in series header");
            snapshot.reference_price = reference_price;
            return Ok(());
        };

        let mut rows = 0;
        let mut min_price = i64::MAX;
        let mut max_price = i64::MIN;

        for line in body.split('\n') {
            if rows == SERIES_CAPACITY {
                break;
            }
            let line = line.strip_suffix('\r').unwrap_or(line);
            let Some(field) = line.split(',').nth(column).filter(|f| !f.is_empty()) else {
                continue;
            };

            let raw = truncate_to(field, PRICE_TEXT_MAX);
            let cents = parse_cents(raw);

            if rows == 0 {
                compose_label(&mut snapshot.label, symbol, raw);
            }

            min_price = min_price.min(cents);
            max_price = max_price.max(cents);
            snapshot.prices[SERIES_CAPACITY - 1 - rows] = cents;
            rows += 1;
        }

        snapshot.reference_price = reference_price;
        if rows > 0 {
            snapshot.min_price = min_price;
            snapshot.max_price = max_price;
        }
        snapshot.populated = rows;

        info!(
            symbol,
            slot,
            rows,
            min = snapshot.min_price,
            max = snapshot.max_price,
            "Series snapshot refreshed"
        );
        Ok(())
    }

    /// Next snapshot in slot order, wrapping; `None` with no slots.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&InstrumentSnapshot> {
        let index = self.cursor.advance(self.snapshots.len())?;
        self.snapshots.get(index)
    }

    pub fn snapshot(&self, slot: usize) -> Option<&InstrumentSnapshot> {
        self.snapshots.get(slot)
    }

    pub fn slots(&self) -> usize {
        self.snapshots.len()
    }
}

/// Index of the header column whose text is exactly `name`.
fn find_column(header: &str, name: &str) -> Option<usize> {
    let header = header.strip_suffix('\r').unwrap_or(header);
    header.split(',').position(|column| column == name)
}

/// Longest prefix of `s` that is at most `max` bytes and ends on a char boundary.
fn truncate_to(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// `"<symbol>: <price text>"`, cut to `LABEL_MAX_LEN` bytes.
fn compose_label(label: &mut String, symbol: &str, raw: &str) {
    label.clear();
    label.push_str(symbol);
    label.push_str(": ");
    label.push_str(raw);
    let keep = truncate_to(label, LABEL_MAX_LEN).len();
    label.truncate(keep);
}

/// Parse a decimal price into integer cents, truncating toward zero.
///
/// Reads the longest leading number (optional sign, digits, fraction,
/// exponent) and ignores anything after it. Text with no leading number is 0.
fn parse_cents(raw: &str) -> i64 {
    let text = raw.trim_start();
    let number = numeric_prefix(text);

    let (negative, digits) = match number.as_bytes().first() {
        Some(b'-') => (true, &number[1..]),
        Some(b'+') => (false, &number[1..]),
        _ => (false, number),
    };
    let digits = if digits.starts_with('.') {
        format!("0{digits}")
    } else {
        digits.to_string()
    };
    let parsed = if digits.contains(['e', 'E']) {
        Decimal::from_scientific(&digits)
    } else {
        Decimal::from_str(&digits)
    };

    let cents = parsed
        .ok()
        .and_then(|d| d.checked_mul(Decimal::ONE_HUNDRED))
        .and_then(|d| d.trunc().to_i64())
        .map(|c| if negative { -c } else { c });

    match cents {
        Some(cents) => cents,
        None => {
            warn!(raw, "Unparsable price, using 0");
            0
        }
    }
}

fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let has_int = end > int_start;

    if end + 1 < bytes.len() && bytes[end] == b'.' && bytes[end + 1].is_ascii_digit() {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    } else if !has_int {
        debug!(text = s, "No numeric prefix");
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = exp;
        while exp < bytes.len() && bytes[exp].is_ascii_digit() {
            exp += 1;
        }
        if exp > exp_digits {
            end = exp;
        }
    }

    &s[..end]
}
