//! Tag-pair scanning.
//!
//! Locates the content between one start/end marker pair. Matching is a
//! plain two-phase search (seek the start marker, then the end marker) that
//! restarts on the mismatching byte instead of backtracking. Markers are a
//! handful of bytes so the O(n·m) worst case does not matter.
//!
//! The scanner keeps no state between calls. Callers that pull many pairs
//! out of one buffer thread a `TagCursor` through the calls; each call resumes
//! strictly forward from where the previous one stopped.

use std::ops::Range;

/// Start and end markers delimiting embedded content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagPair {
    pub open: &'static str,
    pub close: &'static str,
}

impl TagPair {
    pub const fn new(open: &'static str, close: &'static str) -> Self {
        Self { open, close }
    }
}

/// Result of one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Content lies in `content`; the closing marker ends right before `resume_at`.
    ///
    /// `content.end` is the first byte of the closing marker, so the last
    /// content byte is `content.end - 1`.
    Found {
        content: Range<usize>,
        resume_at: usize,
    },
    /// Both markers are present with nothing between them.
    Empty {
        /// First byte after the closing marker.
        advance_to: usize,
    },
    /// No complete pair before the end of the buffer.
    NotFound { exhausted_at: usize },
}

impl ScanOutcome {
    /// Byte position scanning should continue from.
    pub fn next_position(&self) -> usize {
        match self {
            Self::Found { resume_at, .. } => *resume_at,
            Self::Empty { advance_to } => *advance_to,
            Self::NotFound { exhausted_at } => *exhausted_at,
        }
    }

    pub fn content(&self) -> Option<Range<usize>> {
        match self {
            Self::Found { content, .. } => Some(content.clone()),
            _ => None,
        }
    }
}

/// Scan `buf` from byte `pos` for the next occurrence of `pair`.
pub fn scan(buf: &str, pos: usize, pair: &TagPair) -> ScanOutcome {
    let bytes = buf.as_bytes();
    let exhausted = ScanOutcome::NotFound {
        exhausted_at: bytes.len(),
    };

    let Some(open_at) = find_marker(bytes, pos, pair.open.as_bytes()) else {
        return exhausted;
    };
    let content_start = open_at + pair.open.len();

    // An unterminated pair yields nothing
    let Some(close_at) = find_marker(bytes, content_start, pair.close.as_bytes()) else {
        return exhausted;
    };

    if close_at <= content_start {
        return ScanOutcome::Empty {
            advance_to: close_at + pair.close.len(),
        };
    }

    ScanOutcome::Found {
        content: content_start..close_at,
        resume_at: close_at + pair.close.len(),
    }
}

/// Position of the first `marker` match at or after `from`.
///
/// On a partial match the search resumes at the mismatching byte, which is
/// then tested against the first marker byte again.
fn find_marker(hay: &[u8], from: usize, marker: &[u8]) -> Option<usize> {
    let first = *marker.first()?;
    let mut i = from;

    while i < hay.len() {
        if hay[i] != first {
            i += 1;
            continue;
        }

        let start = i;
        let mut j = 0;
        while i < hay.len() && j < marker.len() && hay[i] == marker[j] {
            i += 1;
            j += 1;
        }
        if j == marker.len() {
            return Some(start);
        }
    }

    None
}

/// Borrowed buffer plus the caller's scan position.
#[derive(Debug, Clone, Copy)]
pub struct TagCursor<'a> {
    buf: &'a str,
    pos: usize,
}

impl<'a> TagCursor<'a> {
    pub fn new(buf: &'a str) -> Self {
        Self { buf, pos: 0 }
    }

    /// Scan for the next `pair` and move past whatever the scan consumed.
    pub fn next_pair(&mut self, pair: &TagPair) -> ScanOutcome {
        let outcome = scan(self.buf, self.pos, pair);
        self.pos = outcome.next_position();
        outcome
    }

    /// Scan for `pair` only in the text before the next `stop` marker.
    ///
    /// A miss leaves the position untouched so the caller can still find
    /// `stop` afterwards.
    pub fn next_pair_before(&mut self, pair: &TagPair, stop: &str) -> ScanOutcome {
        let limit = find_marker(self.buf.as_bytes(), self.pos, stop.as_bytes())
            .unwrap_or(self.buf.len());
        let outcome = scan(&self.buf[..limit], self.pos, pair);
        if !matches!(outcome, ScanOutcome::NotFound { .. }) {
            self.pos = outcome.next_position();
        }
        outcome
    }
}
