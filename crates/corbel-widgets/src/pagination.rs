#![forbid(unsafe_code)]

//! Headless pagination: record navigation plus a planned marker strip.
//!
//! [`PaginationState`] owns the record math (current page, page size,
//! total items) and [`Pagination`] turns that state into the strip of
//! [`PagerItem`]s a view renders. Page changes clamp rather than fail, so
//! callers can feed raw input straight through.

use corbel_core::event::{KeyCode, KeyEvent};
use corbel_layout::pager::{PageMarker, PagePlanner};

/// Default page size options offered by a pagination control.
pub const DEFAULT_PAGE_SIZE_OPTIONS: [u64; 4] = [10, 25, 50, 100];

/// Pagination widget configuration.
#[derive(Debug, Clone)]
pub struct Pagination {
    planner: PagePlanner,
    page_size_options: Vec<u64>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new()
    }
}

impl Pagination {
    /// Create a pagination control with default window and size options.
    #[must_use]
    pub fn new() -> Self {
        Self {
            planner: PagePlanner::new(),
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
        }
    }

    /// Set the marker window radius around the current page.
    #[must_use]
    pub const fn with_delta(mut self, delta: u64) -> Self {
        self.planner = self.planner.with_delta(delta);
        self
    }

    /// Set the page sizes offered to the user.
    #[must_use]
    pub fn page_size_options(mut self, options: impl IntoIterator<Item = u64>) -> Self {
        self.page_size_options = options.into_iter().filter(|&size| size > 0).collect();
        self
    }

    /// The configured page size options.
    #[must_use]
    pub fn size_options(&self) -> &[u64] {
        &self.page_size_options
    }

    /// The marker planner this control plans with.
    #[must_use]
    pub const fn planner(&self) -> &PagePlanner {
        &self.planner
    }

    /// The marker strip for `state`, with the current page flagged.
    #[must_use]
    pub fn items(&self, state: &PaginationState) -> Vec<PagerItem> {
        let current = state.page();
        self.planner
            .plan(current, state.total_pages())
            .into_iter()
            .map(|marker| PagerItem {
                active: marker == PageMarker::Page(current),
                marker,
            })
            .collect()
    }
}

/// One rendered slot of a pagination strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerItem {
    /// The marker to render.
    pub marker: PageMarker,
    /// Whether this marker is the current page.
    pub active: bool,
}

/// Persistable pagination state.
///
/// `page` is 1-based. Internal invariants (`page >= 1`, `page_size >= 1`)
/// are maintained by the operations; accessors clamp defensively so a
/// state restored from stale persisted data still behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct PaginationState {
    page: u64,
    page_size: u64,
    total_items: u64,
}

impl PaginationState {
    /// Create state for `total_items` records shown `page_size` at a time,
    /// starting on page 1. A zero page size is treated as 1.
    #[must_use]
    pub const fn new(total_items: u64, page_size: u64) -> Self {
        Self {
            page: 1,
            page_size: if page_size == 0 { 1 } else { page_size },
            total_items,
        }
    }

    /// Current page (1-based).
    #[inline]
    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    /// Records shown per page.
    #[inline]
    #[must_use]
    pub fn page_size(&self) -> u64 {
        self.page_size.max(1)
    }

    /// Total number of records.
    #[inline]
    #[must_use]
    pub const fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Number of pages, at least 1 even when empty.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total_items.div_ceil(self.page_size()).max(1)
    }

    /// 0-based index of the first record on the current page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size())
    }

    /// Query limit; alias for the page size.
    #[inline]
    #[must_use]
    pub fn limit(&self) -> u64 {
        self.page_size()
    }

    /// 1-based inclusive record range of the current page.
    ///
    /// `None` when there are no records or the page sits past the data.
    #[must_use]
    pub fn item_range(&self) -> Option<(u64, u64)> {
        let start = self.offset() + 1;
        if self.total_items == 0 || start > self.total_items {
            return None;
        }
        let end = (self.offset() + self.page_size()).min(self.total_items);
        Some((start, end))
    }

    /// Go to `page`, clamped into range. Returns whether the page changed.
    pub fn set_page(&mut self, page: u64) -> bool {
        let next = page.clamp(1, self.total_pages());
        if next == self.page {
            return false;
        }
        #[cfg(feature = "tracing")]
        let from = self.page;
        self.page = next;
        #[cfg(feature = "tracing")]
        Self::log_page(from, self.page);
        true
    }

    /// Advance one page. Returns whether the page changed.
    pub fn next_page(&mut self) -> bool {
        self.set_page(self.page.saturating_add(1))
    }

    /// Go back one page. Returns whether the page changed.
    pub fn prev_page(&mut self) -> bool {
        self.set_page(self.page.saturating_sub(1))
    }

    /// Jump to the first page. Returns whether the page changed.
    pub fn first_page(&mut self) -> bool {
        self.set_page(1)
    }

    /// Jump to the last page. Returns whether the page changed.
    pub fn last_page(&mut self) -> bool {
        self.set_page(self.total_pages())
    }

    /// Replace the record count, keeping the page in range.
    pub fn set_total_items(&mut self, total_items: u64) {
        self.total_items = total_items;
        self.page = self.page.clamp(1, self.total_pages());
    }

    /// Change the page size, keeping the record that led the old page
    /// visible on the new one. Returns whether anything changed.
    pub fn set_page_size(&mut self, page_size: u64) -> bool {
        let next = page_size.max(1);
        if next == self.page_size {
            return false;
        }
        let first_visible = self.offset();
        #[cfg(feature = "tracing")]
        let from = self.page_size;
        self.page_size = next;
        self.page = first_visible / next + 1;
        // Restored states may carry a page past the data; re-clamp.
        self.page = self.page.min(self.total_pages());
        #[cfg(feature = "tracing")]
        Self::log_page_size(from, next);
        true
    }

    /// Handle a navigation key. Returns whether the page changed.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Left | KeyCode::PageUp => self.prev_page(),
            KeyCode::Right | KeyCode::PageDown => self.next_page(),
            KeyCode::Home => self.first_page(),
            KeyCode::End => self.last_page(),
            _ => false,
        }
    }

    #[cfg(feature = "tracing")]
    fn log_page(from: u64, to: u64) {
        tracing::debug!(message = "pagination.page", from, to);
    }

    #[cfg(feature = "tracing")]
    fn log_page_size(from: u64, to: u64) {
        tracing::debug!(message = "pagination.page_size", from, to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- page math tests ---

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(PaginationState::new(0, 10).total_pages(), 1);
        assert_eq!(PaginationState::new(1, 10).total_pages(), 1);
        assert_eq!(PaginationState::new(10, 10).total_pages(), 1);
        assert_eq!(PaginationState::new(11, 10).total_pages(), 2);
        assert_eq!(PaginationState::new(95, 10).total_pages(), 10);
    }

    #[test]
    fn zero_page_size_treated_as_one() {
        let state = PaginationState::new(5, 0);
        assert_eq!(state.page_size(), 1);
        assert_eq!(state.total_pages(), 5);
    }

    #[test]
    fn item_range_tracks_page() {
        let mut state = PaginationState::new(95, 10);
        assert_eq!(state.item_range(), Some((1, 10)));

        state.set_page(10);
        assert_eq!(state.item_range(), Some((91, 95)));
        assert_eq!(state.offset(), 90);
        assert_eq!(state.limit(), 10);
    }

    #[test]
    fn item_range_empty_when_no_records() {
        assert_eq!(PaginationState::new(0, 10).item_range(), None);
    }

    // --- navigation tests ---

    #[test]
    fn set_page_clamps_and_reports_change() {
        let mut state = PaginationState::new(95, 10);
        assert!(state.set_page(5));
        assert!(!state.set_page(5));
        assert!(state.set_page(999));
        assert_eq!(state.page(), 10);
        assert!(state.set_page(0));
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn stepping_stops_at_ends() {
        let mut state = PaginationState::new(25, 10);
        assert!(!state.prev_page());
        assert!(state.next_page());
        assert!(state.next_page());
        assert!(!state.next_page(), "cannot advance past the last page");
        assert_eq!(state.page(), 3);

        assert!(state.first_page());
        assert_eq!(state.page(), 1);
        assert!(state.last_page());
        assert_eq!(state.page(), 3);
    }

    #[test]
    fn shrinking_totals_pull_page_back() {
        let mut state = PaginationState::new(95, 10);
        state.set_page(10);
        state.set_total_items(42);
        assert_eq!(state.page(), 5);
        state.set_total_items(0);
        assert_eq!(state.page(), 1);
        assert_eq!(state.item_range(), None);
    }

    // --- page size tests ---

    #[test]
    fn page_size_change_keeps_first_record_visible() {
        let mut state = PaginationState::new(95, 10);
        state.set_page(4);
        // Page 4 of 10 leads with record 31.
        assert_eq!(state.item_range(), Some((31, 40)));

        assert!(state.set_page_size(25));
        assert_eq!(state.page(), 2);
        assert_eq!(state.item_range(), Some((26, 50)));

        assert!(state.set_page_size(100));
        assert_eq!(state.page(), 1);
        assert_eq!(state.item_range(), Some((1, 95)));
    }

    #[test]
    fn page_size_change_reports_no_change() {
        let mut state = PaginationState::new(95, 10);
        assert!(!state.set_page_size(10));
        assert!(state.set_page_size(0), "zero clamps to one, which differs");
        assert_eq!(state.page_size(), 1);
    }

    // --- key handling tests ---

    #[test]
    fn keys_map_to_navigation() {
        let mut state = PaginationState::new(95, 10);
        assert!(state.handle_key(&KeyEvent::new(KeyCode::Right)));
        assert_eq!(state.page(), 2);
        assert!(state.handle_key(&KeyEvent::new(KeyCode::Left)));
        assert_eq!(state.page(), 1);
        assert!(state.handle_key(&KeyEvent::new(KeyCode::End)));
        assert_eq!(state.page(), 10);
        assert!(state.handle_key(&KeyEvent::new(KeyCode::Home)));
        assert_eq!(state.page(), 1);
        assert!(!state.handle_key(&KeyEvent::new(KeyCode::Enter)));
    }

    // --- strip tests ---

    #[test]
    fn items_flag_current_page() {
        let pagination = Pagination::new();
        let mut state = PaginationState::new(95, 10);
        state.set_page(5);

        let items = pagination.items(&state);
        let strip: Vec<_> = items.iter().map(|item| item.marker).collect();
        assert_eq!(strip, corbel_layout::pager::plan(5, 10));

        let active: Vec<_> = items.iter().filter(|item| item.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].marker, PageMarker::Page(5));
    }

    #[test]
    fn items_never_flag_ellipsis() {
        let pagination = Pagination::new();
        let mut state = PaginationState::new(1000, 10);
        state.set_page(50);
        assert!(
            pagination
                .items(&state)
                .iter()
                .all(|item| !(item.active && item.marker.is_ellipsis()))
        );
    }

    #[test]
    fn custom_delta_flows_into_strip() {
        let pagination = Pagination::new().with_delta(1);
        let mut state = PaginationState::new(200, 10);
        state.set_page(10);
        let items = pagination.items(&state);
        assert_eq!(items.len(), pagination.planner().max_markers());
    }

    #[test]
    fn size_options_filter_zero() {
        let pagination = Pagination::new().page_size_options([0, 10, 50]);
        assert_eq!(pagination.size_options(), &[10, 50]);
    }

    // --- persistence tests ---

    #[cfg(feature = "state-persistence")]
    #[test]
    fn state_round_trips_through_json() {
        let mut state = PaginationState::new(95, 10);
        state.set_page(7);
        let json = serde_json::to_string(&state).unwrap();
        let back: PaginationState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }
}
