//! Round-robin read cursor.
//!
//! Both snapshots are consumed one record per draw cycle. The cursor only
//! holds the next index; the collection owner supplies the live count on
//! every call so the cursor never outlives a generation it does not know about.

/// Read position over a collection that wraps after the last element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemCursor {
    index: usize,
}

impl ItemCursor {
    pub const fn new() -> Self {
        Self { index: 0 }
    }

    /// Return the index to read and move to the next one.
    ///
    /// Yields `None` when `count == 0`. An index left over from a larger
    /// collection restarts at zero.
    pub fn advance(&mut self, count: usize) -> Option<usize> {
        if count == 0 {
            return None;
        }
        if self.index >= count {
            self.index = 0;
        }
        let current = self.index;
        self.index = (current + 1) % count;
        Some(current)
    }

    /// Rewind to the first element.
    pub fn reset(&mut self) {
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yields_none() {
        let mut cursor = ItemCursor::new();
        assert_eq!(cursor.advance(0), None);
        assert_eq!(cursor.index, 0);
    }

    #[test]
    fn test_wraps_after_count() {
        let mut cursor = ItemCursor::new();
        let seen: Vec<_> = (0..7).filter_map(|_| cursor.advance(3)).collect();
        assert_eq!(seen, vec![0, 1, 2, 0, 1, 2, 0]);
        assert_eq!(cursor.index, 1);
    }

    #[test]
    fn test_single_element_repeats() {
        let mut cursor = ItemCursor::new();
        assert_eq!(cursor.advance(1), Some(0));
        assert_eq!(cursor.advance(1), Some(0));
        assert_eq!(cursor.index, 0);
    }

    #[test]
    fn test_shrunk_collection_restarts() {
        let mut cursor = ItemCursor::new();
        cursor.advance(5);
        cursor.advance(5);
        cursor.advance(5);
        assert_eq!(cursor.index, 3);
        assert_eq!(cursor.advance(2), Some(0));
        assert_eq!(cursor.advance(2), Some(1));
    }

    #[test]
    fn test_reset() {
        let mut cursor = ItemCursor::new();
        cursor.advance(4);
        cursor.advance(4);
        cursor.reset();
        assert_eq!(cursor.advance(4), Some(0));
    }
}
