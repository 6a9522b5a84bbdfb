//! News feed snapshot.
//!
//! Each refresh replaces the whole snapshot generation: the previous records
//! are dropped and their budget charge released before the new payload is
//! scanned. The first two `<title>` pairs belong to the channel and its logo
//! and are skipped; every following title (with the description that comes
//! before the next title, if any) becomes one record, up to `FEED_CAPACITY`.
//!
//! Running out of storage part-way keeps the records already installed for
//! this generation. The renderer then simply cycles through fewer items.

use crate::entity;
use crate::error::FeedResult;
use crate::scanner::{ScanOutcome, TagCursor, TagPair};
use panel_core::{BoundedVec, FeedRecord, ItemCursor, MemoryBudget};
use std::ops::Range;
use tracing::{debug, error, info, warn};

/// Maximum number of items kept per generation.
pub const FEED_CAPACITY: usize = 12;

/// Channel-level titles preceding the first item.
const FEED_LEVEL_TITLES: usize = 2;

pub const TITLE: TagPair = TagPair::new("<title>", "</title>");
pub const DESCRIPTION: TagPair = TagPair::new("<description>", "</description>");

/// Current news snapshot plus its read cursor.
#[derive(Debug)]
pub struct FeedParser {
    records: BoundedVec<FeedRecord>,
    cursor: ItemCursor,
    budget: MemoryBudget,
    generation: u64,
}

impl FeedParser {
    pub fn new() -> Self {
        Self::with_budget(MemoryBudget::unbounded())
    }

    /// Create a parser whose generations may hold at most the budget's bytes.
    pub fn with_budget(budget: MemoryBudget) -> Self {
        Self {
            records: BoundedVec::new(FEED_CAPACITY),
            cursor: ItemCursor::new(),
            budget,
            generation: 0,
        }
    }

    /// Replace the snapshot with the items found in `payload`.
    ///
    /// `None` means the fetch failed; the current snapshot is kept as is.
    pub fn refresh(&mut self, payload: Option<&str>) {
        let Some(payload) = payload else {
            warn!(
                generation = self.generation,
                "No feed payload, keeping previous snapshot"
            );
            return;
        };

        self.discard();
        self.generation += 1;

        let mut cursor = TagCursor::new(payload);
        for _ in 0..FEED_LEVEL_TITLES {
            if let ScanOutcome::NotFound { .. } = cursor.next_pair(&TITLE) {
                warn!(
                    generation = self.generation,
                    "Feed has no item titles, snapshot left empty"
                );
                return;
            }
        }

        while !self.records.is_full() {
            let title = match cursor.next_pair(&TITLE) {
                ScanOutcome::Found { content, .. } => content,
                ScanOutcome::Empty { advance_to } => {
                    debug!(position = advance_to, "Skipping empty item title");
                    continue;
                }
                ScanOutcome::NotFound { .. } => break,
            };
            let description = cursor.next_pair_before(&DESCRIPTION, TITLE.open).content();

            if let Err(e) = self.install(payload, title, description) {
                error!(
                    error = %e,
                    installed = self.records.len(),
                    "Feed refresh stopped early, keeping partial snapshot"
                );
                break;
            }
        }

        info!(
            generation = self.generation,
            records = self.records.len(),
            bytes = self.budget.used(),
            "Feed snapshot refreshed"
        );
    }

    /// Decode one item and append it.
    ///
    /// Charges go to a copy of the budget that is only committed once the
    /// record is installed, so a failed item leaves no charge behind.
    fn install(
        &mut self,
        payload: &str,
        title: Range<usize>,
        description: Option<Range<usize>>,
    ) -> FeedResult<()> {
        let mut budget = self.budget;
        budget.try_charge(std::mem::size_of::<FeedRecord>())?;

        let title = entity::decode(payload, title, &mut budget)?;
        let description = description
            .map(|range| entity::decode(payload, range, &mut budget))
            .transpose()?;

        debug!(
            index = self.records.len(),
            title = %title,
            has_description = description.is_some(),
            "Feed item"
        );
        self.records.try_push(FeedRecord::new(title, description))?;
        self.budget = budget;
        Ok(())
    }

    /// Drop the current generation.
    fn discard(&mut self) {
        self.records.clear();
        self.cursor.reset();
        self.budget.release_all();
    }

    /// Next record in round-robin order, `None` when the snapshot is empty.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&FeedRecord> {
        let index = self.cursor.advance(self.records.len())?;
        self.records.get(index)
    }

    pub fn records(&self) -> &[FeedRecord] {
        self.records.as_slice()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of refreshes that replaced the snapshot.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Bytes held by the current generation.
    pub fn bytes_used(&self) -> usize {
        self.budget.used()
    }
}

impl Default for FeedParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, description: Option<&str>) -> String {
        match description {
            Some(d) => format!("<item><title>{title}</title><description>{d}</description></item>"),
            None => format!("<item><title>{title}</title></item>"),
        }
    }

    fn feed(items: &[String]) -> String {
        format!(
            "<rss><channel><title>Channel</title><image><title>Logo</title></image>{}</channel></rss>",
            items.concat()
        )
    }

    fn titles(parser: &FeedParser) -> Vec<&str> {
        parser.records().iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn test_items_in_document_order() {
        let payload = feed(&[
            item("First", Some("one")),
            item("Second", Some("two")),
            item("Third", None),
        ]);
        let mut parser = FeedParser::new();
        parser.refresh(Some(&payload));

        assert_eq!(titles(&parser), vec!["First", "Second", "Third"]);
        assert_eq!(parser.records()[0].description.as_deref(), Some("one"));
        assert_eq!(parser.records()[1].description.as_deref(), Some("two"));
        assert_eq!(parser.records()[2].description, None);
    }

    #[test]
    fn test_capped_at_capacity() {
        let items: Vec<_> = (0..20).map(|i| item(&format!("T{i}"), None)).collect();
        let mut parser = FeedParser::new();
        parser.refresh(Some(&feed(&items)));

        assert_eq!(parser.len(), FEED_CAPACITY);
        assert_eq!(parser.records()[11].title, "T11");
    }

    #[test]
    fn test_description_not_borrowed_from_next_item() {
        let payload = feed(&[item("NoDesc", None), item("WithDesc", Some("mine"))]);
        let mut parser = FeedParser::new();
        parser.refresh(Some(&payload));

        assert_eq!(parser.records()[0].description, None);
        assert_eq!(parser.records()[1].title, "WithDesc");
        assert_eq!(parser.records()[1].description.as_deref(), Some("mine"));
    }

    #[test]
    fn test_entities_decoded_in_both_fields() {
        let payload = feed(&[item("Q&#039;s &#038; A", Some("&quot;quoted&quot;"))]);
        let mut parser = FeedParser::new();
        parser.refresh(Some(&payload));

        assert_eq!(parser.records()[0].title, "Q's & A");
        assert_eq!(parser.records()[0].description.as_deref(), Some("\"quoted\""));
    }

    #[test]
    fn test_empty_title_and_description_skipped() {
        let payload = feed(&[
            "<item><title></title></item>".to_string(),
            item("Real", Some("")),
        ]);
        let mut parser = FeedParser::new();
        parser.refresh(Some(&payload));

        assert_eq!(titles(&parser), vec!["Real"]);
        assert_eq!(parser.records()[0].description, None);
    }

    #[test]
    fn test_missing_payload_keeps_snapshot() {
        let mut parser = FeedParser::new();
        parser.refresh(Some(&feed(&[item("Kept", None)])));
        parser.refresh(None);

        assert_eq!(parser.generation(), 1);
        assert_eq!(titles(&parser), vec!["Kept"]);
    }

    #[test]
    fn test_no_titles_gives_empty_snapshot() {
        let mut parser = FeedParser::new();
        parser.refresh(Some(&feed(&[item("Old", None)])));
        parser.refresh(Some("<html>maintenance</html>"));

        assert!(parser.is_empty());
        assert!(parser.next().is_none());
        assert_eq!(parser.bytes_used(), 0);
    }

    #[test]
    fn test_only_channel_titles() {
        let mut parser = FeedParser::new();
        parser.refresh(Some(&feed(&[])));
        assert!(parser.is_empty());
    }

    #[test]
    fn test_next_wraps() {
        let payload = feed(&[item("A", None), item("B", None), item("C", None)]);
        let mut parser = FeedParser::new();
        parser.refresh(Some(&payload));

        let first: Vec<String> = (0..3).map(|_| parser.next().unwrap().title.clone()).collect();
        assert_eq!(first, vec!["A", "B", "C"]);
        assert_eq!(parser.next().unwrap().title, "A");
    }

    #[test]
    fn test_refresh_rewinds_cursor() {
        let mut parser = FeedParser::new();
        parser.refresh(Some(&feed(&[item("A", None), item("B", None)])));
        parser.next();

        parser.refresh(Some(&feed(&[item("X", None), item("Y", None)])));
        assert_eq!(parser.next().unwrap().title, "X");
    }

    #[test]
    fn test_second_refresh_releases_first_generation() {
        let big: Vec<_> = (0..12)
            .map(|i| item(&format!("Long headline number {i}"), Some("Some long description text")))
            .collect();
        let small = feed(&[item("Tiny", None)]);

        let mut fresh = FeedParser::new();
        fresh.refresh(Some(&small));

        let mut reused = FeedParser::new();
        reused.refresh(Some(&feed(&big)));
        assert!(reused.bytes_used() > fresh.bytes_used());
        reused.refresh(Some(&small));

        assert_eq!(reused.bytes_used(), fresh.bytes_used());
        assert_eq!(reused.len(), 1);
        assert_eq!(reused.generation(), 2);
    }

    // Storage running out mid-refresh leaves the partial generation installed.
    #[test]
    fn test_budget_exhaustion_keeps_partial_generation() {
        let items: Vec<_> = (0..5).map(|i| item(&format!("Item {i}"), Some("desc"))).collect();
        let payload = feed(&items);

        let mut reference = FeedParser::new();
        reference.refresh(Some(&feed(&items[..2])));
        let two_items = reference.bytes_used();

        let mut parser = FeedParser::with_budget(MemoryBudget::with_limit(two_items + 3));
        parser.refresh(Some(&payload));

        assert_eq!(titles(&parser), vec!["Item 0", "Item 1"]);
        assert_eq!(parser.bytes_used(), two_items);
        assert_eq!(parser.next().unwrap().title, "Item 0");
    }

    #[test]
    fn test_field_exhaustion_leaves_no_charge() {
        let kept = [item("Item 0", Some("desc")), item("Item 1", Some("desc"))];
        let mut reference = FeedParser::new();
        reference.refresh(Some(&feed(&kept)));
        let two_items = reference.bytes_used();

        let mut items = kept.to_vec();
        items.push(item("A2", Some("dd")));
        let payload = feed(&items);
        let record = std::mem::size_of::<FeedRecord>();

        // Room for the third record and 1 byte: title "A2" fails.
        // Room for the third record and 3 bytes: title fits, description "dd" fails.
        for spare in [1, 3] {
            let budget = MemoryBudget::with_limit(two_items + record + spare);
            let mut parser = FeedParser::with_budget(budget);
            parser.refresh(Some(&payload));

            assert_eq!(parser.len(), 2, "spare = {spare}");
            assert_eq!(parser.bytes_used(), two_items, "spare = {spare}");
            assert_eq!(titles(&parser), vec!["Item 0", "Item 1"]);
        }
    }
}
