#![forbid(unsafe_code)]

//! Page marker planning for pagination strips.
//!
//! Given a current page and a total page count, [`PagePlanner::plan`]
//! produces the marker sequence a pagination control renders: page one and
//! the last page are always present, a window of pages rides around the
//! current page, and ellipses stand in for the collapsed runs on either
//! side. Small collections render in full with no ellipsis at all.
//!
//! The planner is a pure function over its inputs. Out-of-range inputs
//! clamp; nothing here can fail.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default window radius around the current page.
pub const DEFAULT_DELTA: u64 = 2;

/// One slot in a pagination strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PageMarker {
    /// A concrete page number (1-based).
    Page(u64),
    /// A collapsed run of pages.
    Ellipsis,
}

impl PageMarker {
    /// The page number, if this marker is one.
    #[inline]
    #[must_use]
    pub const fn as_page(&self) -> Option<u64> {
        match self {
            Self::Page(n) => Some(*n),
            Self::Ellipsis => None,
        }
    }

    /// Check if this marker is an ellipsis.
    #[inline]
    #[must_use]
    pub const fn is_ellipsis(&self) -> bool {
        matches!(self, Self::Ellipsis)
    }
}

impl fmt::Display for PageMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(n) => write!(f, "{n}"),
            Self::Ellipsis => f.write_str("…"),
        }
    }
}

/// Plans the marker sequence for a pagination strip.
///
/// The window keeps `delta` pages on each side of the current page when it
/// sits in the middle of the range, and pins to a fixed run of
/// `delta + 2` interior pages at either end so the strip length stays
/// stable while stepping through the boundary region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagePlanner {
    delta: u64,
}

impl Default for PagePlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl PagePlanner {
    /// Create a planner with the default window radius.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delta: DEFAULT_DELTA,
        }
    }

    /// Set the window radius around the current page.
    #[must_use]
    pub const fn with_delta(mut self, delta: u64) -> Self {
        self.delta = delta;
        self
    }

    /// The configured window radius.
    #[inline]
    #[must_use]
    pub const fn delta(&self) -> u64 {
        self.delta
    }

    /// Worst-case number of markers a plan can contain.
    ///
    /// First page, last page, two ellipses, and the full middle window.
    #[must_use]
    pub const fn max_markers(&self) -> usize {
        let markers = self.delta.saturating_mul(2).saturating_add(5);
        if markers > usize::MAX as u64 {
            usize::MAX
        } else {
            markers as usize
        }
    }

    /// Plan the marker sequence for `current_page` of `total_pages`.
    ///
    /// Inputs clamp: a zero total plans a single page, and a current page
    /// outside `1..=total_pages` plans as the nearest valid page.
    #[must_use]
    pub fn plan(&self, current_page: u64, total_pages: u64) -> Vec<PageMarker> {
        let delta = self.delta;
        let total = total_pages.max(1);
        let current = current_page.clamp(1, total);

        // Everything fits without collapsing.
        if total <= delta.saturating_mul(2).saturating_add(3) {
            return (1..=total).map(PageMarker::Page).collect();
        }

        // Interior window bounds. Near-start is checked before near-end so
        // the start window wins when both conditions hold.
        let (lo, hi) = if current < delta + 3 {
            (2, (delta + 3).min(total - 1))
        } else if current >= total - delta - 2 {
            ((total - delta - 2).max(2), total - 1)
        } else {
            (current - delta, current + delta)
        };

        let mut markers = Vec::with_capacity((hi - lo) as usize + 5);
        markers.push(PageMarker::Page(1));
        push_gap(&mut markers, 1, lo);
        markers.extend((lo..=hi).map(PageMarker::Page));
        push_gap(&mut markers, hi, total);
        markers.push(PageMarker::Page(total));
        markers
    }
}

/// Collapse the run between two emitted page numbers.
///
/// Adjacent numbers need nothing; any skipped page becomes an ellipsis.
#[inline]
fn push_gap(markers: &mut Vec<PageMarker>, prev: u64, next: u64) {
    if next - prev >= 2 {
        markers.push(PageMarker::Ellipsis);
    }
}

/// Plan a marker sequence with the default window radius.
///
/// # Examples
///
/// ```
/// use corbel_layout::pager::{plan, PageMarker};
///
/// let markers = plan(5, 10);
/// assert_eq!(
///     markers,
///     [
///         PageMarker::Page(1),
///         PageMarker::Ellipsis,
///         PageMarker::Page(3),
///         PageMarker::Page(4),
///         PageMarker::Page(5),
///         PageMarker::Page(6),
///         PageMarker::Page(7),
///         PageMarker::Ellipsis,
///         PageMarker::Page(10),
///     ]
/// );
/// ```
#[must_use]
pub fn plan(current_page: u64, total_pages: u64) -> Vec<PageMarker> {
    PagePlanner::new().plan(current_page, total_pages)
}
