//! In-memory projection of a fetched collection.
//!
//! A [`CollectionView`] keeps a displayable, searchable, paginated copy of
//! a server collection synchronized with mutation outcomes, without a full
//! re-fetch after every write. It depends only on record shapes, never on
//! the HTTP clients; records are held by value, so each view owns an
//! independent snapshot.

use byline_types::{Article, Comment};

/// A record a view can hold: identity plus filter matching.
pub trait ViewRecord {
    /// Server-assigned id used for deduplication and delete.
    fn record_id(&self) -> i64;

    /// Case-insensitive filter match. `needle` is already lowercased and
    /// never empty.
    fn matches_filter(&self, needle: &str) -> bool;
}

impl ViewRecord for Article {
    fn record_id(&self) -> i64 {
        self.id
    }

    fn matches_filter(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.body.to_lowercase().contains(needle)
    }
}

impl ViewRecord for Comment {
    fn record_id(&self) -> i64 {
        self.id
    }

    fn matches_filter(&self, needle: &str) -> bool {
        self.text.to_lowercase().contains(needle)
            || self.author.name.to_lowercase().contains(needle)
    }
}

/// Feature switches for a view.
///
/// One parameterized view replaces per-screen variants: a screen without a
/// search box disables search, a short list disables pagination.
#[derive(Debug, Clone, Copy)]
pub struct ViewOptions {
    pub enable_search: bool,
    pub enable_pagination: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            enable_search: true,
            enable_pagination: true,
        }
    }
}

/// Ordered, id-deduplicated projection of a fetched collection.
///
/// Server order is preserved on load; mutations keep the sequence
/// consistent with what a fresh fetch would return. The `apply_*` methods
/// are pure local-state operations and never fail; a missing local match
/// is handled, not raised. Instances are not internally synchronized —
/// concurrent writers must serialize access outside.
#[derive(Debug)]
pub struct CollectionView<T> {
    items: Vec<T>,
    filter: String,
    options: ViewOptions,
}

impl<T: ViewRecord> CollectionView<T> {
    pub fn new() -> Self {
        Self::with_options(ViewOptions::default())
    }

    pub fn with_options(options: ViewOptions) -> Self {
        Self {
            items: Vec::new(),
            filter: String::new(),
            options,
        }
    }

    /// Replaces the backing sequence and resets filter state.
    ///
    /// When two in-flight fetches race, whichever response is loaded last
    /// wins; no generation counting is done here.
    pub fn load(&mut self, items: Vec<T>) {
        self.items = items;
        self.filter.clear();
    }

    /// Applies a create outcome: the new record surfaces first.
    ///
    /// The server response for create carries no position, so the view
    /// picks a deterministic one. Any stale entry with the same id is
    /// dropped first.
    pub fn apply_create(&mut self, record: T) {
        let id = record.record_id();
        self.items.retain(|item| item.record_id() != id);
        self.items.insert(0, record);
    }

    /// Applies an update outcome: replaces the entry with a matching id,
    /// appending when none exists so the record is not lost.
    pub fn apply_update(&mut self, record: T) {
        let id = record.record_id();
        match self.items.iter_mut().find(|item| item.record_id() == id) {
            Some(slot) => *slot = record,
            None => self.items.push(record),
        }
    }

    /// Applies a delete outcome. Deleting an absent id is a no-op.
    pub fn apply_delete(&mut self, id: i64) {
        self.items.retain(|item| item.record_id() != id);
    }

    /// Sets the filter term. Matching is case-insensitive substring; an
    /// empty term yields the unfiltered sequence. No-op when search is
    /// disabled for this view.
    pub fn set_filter(&mut self, term: &str) {
        if self.options.enable_search {
            self.filter = term.to_lowercase();
        }
    }

    /// Returns the current (lowercased) filter term.
    pub fn filter_term(&self) -> &str {
        &self.filter
    }

    /// Returns the filtered sequence in backing order.
    pub fn filtered(&self) -> impl Iterator<Item = &T> + '_ {
        self.items
            .iter()
            .filter(move |item| self.filter.is_empty() || item.matches_filter(&self.filter))
    }

    /// Returns one page of the filtered sequence.
    ///
    /// Pages are 1-based; an out-of-range page or a zero page/size yields
    /// an empty sequence rather than an error. With pagination disabled
    /// the whole filtered sequence is returned.
    pub fn page(&self, page: usize, page_size: usize) -> impl Iterator<Item = &T> + '_ {
        let (skip, take) = if !self.options.enable_pagination {
            (0, usize::MAX)
        } else if page == 0 || page_size == 0 {
            (0, 0)
        } else {
            ((page - 1).saturating_mul(page_size), page_size)
        };
        self.filtered().skip(skip).take(take)
    }

    /// The full backing sequence, unfiltered.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: ViewRecord> Default for CollectionView<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: i64, title: &str, body: &str) -> Article {
        Article {
            id,
            title: title.to_string(),
            body: body.to_string(),
            image_path: None,
            category: "Autres".to_string(),
            author_id: 1,
            created_at: chrono::Utc::now(),
        }
    }

    fn ids<T: ViewRecord>(view: &CollectionView<T>) -> Vec<i64> {
        view.items().iter().map(ViewRecord::record_id).collect()
    }

    fn filtered_ids<T: ViewRecord>(view: &CollectionView<T>) -> Vec<i64> {
        view.filtered().map(ViewRecord::record_id).collect()
    }

    /// Test: no sequence of mutations produces duplicate ids.
    #[test]
    fn test_mutations_never_duplicate_ids() {
        let mut view = CollectionView::new();
        view.load(vec![article(1, "a", ""), article(2, "b", ""), article(3, "c", "")]);

        view.apply_create(article(2, "b again", ""));
        view.apply_update(article(3, "c2", ""));
        view.apply_update(article(4, "d", ""));
        view.apply_create(article(1, "a again", ""));

        let mut seen = ids(&view);
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), view.len());
    }

    /// Test: deleting every loaded id empties the view.
    #[test]
    fn test_delete_all_yields_empty() {
        let mut view = CollectionView::new();
        let items = vec![article(1, "a", ""), article(2, "b", ""), article(3, "c", "")];
        let all_ids: Vec<i64> = items.iter().map(|a| a.id).collect();
        view.load(items);

        for id in all_ids {
            view.apply_delete(id);
        }
        assert!(view.is_empty());
    }

    /// Test: a create outcome surfaces at index 0 of the view.
    #[test]
    fn test_create_prepends() {
        let mut view = CollectionView::new();
        view.load(vec![article(1, "a", ""), article(2, "b", "")]);

        view.apply_create(article(7, "fresh", ""));
        assert_eq!(ids(&view), vec![7, 1, 2]);
    }

    /// Test: delete removes only its id, preserving relative order.
    #[test]
    fn test_delete_preserves_other_order() {
        let mut view = CollectionView::new();
        view.load(vec![article(5, "a", ""), article(7, "b", ""), article(9, "c", "")]);

        view.apply_delete(7);
        assert_eq!(ids(&view), vec![5, 9]);

        // Absent id is a no-op, not an error.
        view.apply_delete(7);
        assert_eq!(ids(&view), vec![5, 9]);
    }

    /// Test: update replaces in place; an unknown id is appended.
    #[test]
    fn test_update_replaces_or_appends() {
        let mut view = CollectionView::new();
        view.load(vec![article(1, "old", ""), article(2, "b", "")]);

        view.apply_update(article(1, "new", ""));
        assert_eq!(view.items()[0].title, "new");
        assert_eq!(ids(&view), vec![1, 2]);

        view.apply_update(article(3, "late", ""));
        assert_eq!(ids(&view), vec![1, 2, 3]);
    }

    /// Test: the empty filter yields the backing sequence, same ids and order.
    #[test]
    fn test_empty_filter_is_identity() {
        let mut view = CollectionView::new();
        view.load(vec![article(3, "c", ""), article(1, "a", ""), article(2, "b", "")]);

        view.set_filter("");
        assert_eq!(filtered_ids(&view), ids(&view));
    }

    /// Test: filtering matches title and body, case-insensitively.
    #[test]
    fn test_filter_matches_title_and_body() {
        let mut view = CollectionView::new();
        view.load(vec![
            article(1, "Rust ships", "a release"),
            article(2, "quiet day", "nothing on RUST today"),
            article(3, "elsewhere", "unrelated"),
        ]);

        view.set_filter("Rust");
        assert_eq!(filtered_ids(&view), vec![1, 2]);

        view.set_filter("release");
        assert_eq!(filtered_ids(&view), vec![1]);
    }

    /// Test: loading a fresh snapshot resets the filter.
    #[test]
    fn test_load_resets_filter() {
        let mut view = CollectionView::new();
        view.load(vec![article(1, "apple", "")]);
        view.set_filter("apple");

        view.load(vec![article(2, "pear", "")]);
        assert_eq!(view.filter_term(), "");
        assert_eq!(filtered_ids(&view), vec![2]);
    }

    /// Test: page bounds. Past-the-end and zero pages are empty; a page
    /// covering the whole sequence returns everything.
    #[test]
    fn test_page_bounds() {
        let mut view = CollectionView::new();
        view.load((1..=5).map(|id| article(id, "t", "")).collect());

        let page1: Vec<i64> = view.page(1, 10).map(ViewRecord::record_id).collect();
        assert_eq!(page1, vec![1, 2, 3, 4, 5]);

        let page2: Vec<i64> = view.page(2, 2).map(ViewRecord::record_id).collect();
        assert_eq!(page2, vec![3, 4]);

        assert_eq!(view.page(4, 2).count(), 0);
        assert_eq!(view.page(0, 2).count(), 0);
        assert_eq!(view.page(1, 0).count(), 0);
    }

    /// Test: pages are restartable — iterating twice gives the same slice.
    #[test]
    fn test_page_restartable() {
        let mut view = CollectionView::new();
        view.load((1..=4).map(|id| article(id, "t", "")).collect());

        let first: Vec<i64> = view.page(2, 2).map(ViewRecord::record_id).collect();
        let second: Vec<i64> = view.page(2, 2).map(ViewRecord::record_id).collect();
        assert_eq!(first, second);
    }

    /// Test: pagination applies to the filtered sequence, not the backing one.
    #[test]
    fn test_page_of_filtered_sequence() {
        let mut view = CollectionView::new();
        view.load(vec![
            article(1, "match one", ""),
            article(2, "skip", ""),
            article(3, "match two", ""),
            article(4, "match three", ""),
        ]);

        view.set_filter("match");
        let page2: Vec<i64> = view.page(2, 2).map(ViewRecord::record_id).collect();
        assert_eq!(page2, vec![4]);
    }

    /// Test: disabled search and pagination degrade to passthrough.
    #[test]
    fn test_disabled_features_pass_through() {
        let mut view = CollectionView::with_options(ViewOptions {
            enable_search: false,
            enable_pagination: false,
        });
        view.load(vec![article(1, "a", ""), article(2, "b", "")]);

        view.set_filter("a");
        assert_eq!(filtered_ids(&view), vec![1, 2]);
        assert_eq!(view.page(9, 1).count(), 2);
    }

    /// Test: comments filter on text and author name.
    #[test]
    fn test_comment_filtering() {
        let comment: Comment = serde_json::from_value(serde_json::json!({
            "id": 1,
            "article_id": 7,
            "user_id": 3,
            "comment": "great piece",
            "user": {"name": "Ana"}
        }))
        .unwrap();

        let mut view = CollectionView::new();
        view.load(vec![comment]);

        view.set_filter("ana");
        assert_eq!(filtered_ids(&view), vec![1]);
        view.set_filter("great");
        assert_eq!(filtered_ids(&view), vec![1]);
        view.set_filter("absent");
        assert!(filtered_ids(&view).is_empty());
    }
}
