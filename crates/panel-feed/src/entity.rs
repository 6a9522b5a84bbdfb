//! Entity decoding for extracted markup text.
//!
//! Only the six spellings the news feed actually emits are recognized. Any
//! other `&` sequence is copied through as-is and reported; it never fails
//! the decode.

use crate::error::FeedResult;
use panel_core::{CoreError, MemoryBudget};
use std::ops::Range;
use tracing::warn;

/// Recognized entity spellings and their replacement.
const ENTITIES: &[(&str, char)] = &[
    ("&quot;", '"'),
    ("&#034;", '"'),
    ("&#038;", '&'),
    ("&#039;", '\''),
    ("&#060;", '<'),
    ("&#062;", '>'),
];

/// Copy `buf[range]` into newly owned text, decoding known entities.
///
/// Storage for the worst case (no entity decoded) is charged to `budget`
/// and reserved before copying. Decoding only shrinks text, so the result
/// never exceeds `range.len()` bytes.
pub fn decode(buf: &str, range: Range<usize>, budget: &mut MemoryBudget) -> FeedResult<String> {
    let start = range.start;
    let text = &buf[range];

    budget.try_charge(text.len())?;
    let mut out = String::new();
    if out.try_reserve_exact(text.len()).is_err() {
        budget.release(text.len());
        return Err(CoreError::Allocation(text.len()).into());
    }

    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        match ENTITIES
            .iter()
            .find(|(spelling, _)| tail.starts_with(spelling))
        {
            Some((spelling, replacement)) => {
                out.push(*replacement);
                rest = &tail[spelling.len()..];
            }
            None => {
                let position = start + (text.len() - tail.len());
                warn!(position, "Unknown escape sequence, copied literally");
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(text: &str) -> String {
        decode(text, 0..text.len(), &mut MemoryBudget::unbounded()).unwrap()
    }

    #[test]
    fn test_known_entities() {
        assert_eq!(
            decode_all("&quot;a&#034; &#038; b&#039;s &#060;tag&#062;"),
            "\"a\" & b's <tag>"
        );
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(decode_all("Markets close higher"), "Markets close higher");
        assert_eq!(decode_all(""), "");
    }

    #[test]
    fn test_unknown_entity_copied_literally() {
        assert_eq!(decode_all("Q&amp;A"), "Q&amp;A");
        assert_eq!(decode_all("AT&T"), "AT&T");
        assert_eq!(decode_all("trailing &"), "trailing &");
    }

    #[test]
    fn test_entity_cut_by_range_is_not_decoded() {
        let buf = "x&quot;";
        let out = decode(buf, 0..4, &mut MemoryBudget::unbounded()).unwrap();
        assert_eq!(out, "x&qu");
    }

    #[test]
    fn test_decodes_subrange_only() {
        let buf = "<title>Fish &#038; Chips</title>";
        let out = decode(buf, 7..24, &mut MemoryBudget::unbounded()).unwrap();
        assert_eq!(out, "Fish & Chips");
    }

    #[test]
    fn test_output_never_longer_than_input() {
        for text in ["&#038;&#038;", "plain", "&&&", "&quot"] {
            assert!(decode_all(text).len() <= text.len());
        }
    }

    #[test]
    fn test_budget_charged_for_worst_case() {
        let text = "&quot;hi&quot;";
        let mut budget = MemoryBudget::unbounded();
        decode(text, 0..text.len(), &mut budget).unwrap();
        assert_eq!(budget.used(), text.len());
    }

    #[test]
    fn test_budget_exhaustion_fails_decode() {
        let mut budget = MemoryBudget::with_limit(3);
        let err = decode("long text", 0..9, &mut budget).unwrap_err();
        assert!(matches!(
            err,
            crate::FeedError::Storage(CoreError::BudgetExhausted { .. })
        ));
        assert_eq!(budget.used(), 0);
    }
}
