#![forbid(unsafe_code)]

//! Layout solvers for headless components.
//!
//! Two pure, deterministic engines plus a memoization layer:
//!
//! - [`pager`]: plans windowed page-marker strips (`1 … 4 5 6 … 20`) for
//!   pagination controls.
//! - [`overlay`]: places floating panels (dropdowns, pickers, menus)
//!   against a viewport with edge margins and below-else-above flipping.
//! - [`cache`]: keyed memoization of pager plans with hit/miss statistics.
//!
//! Everything here is integer math over [`corbel_core::geometry`] types.
//! The solvers never fail: out-of-range inputs are clamped and degenerate
//! viewports produce degenerate-but-valid output.

pub use corbel_core::geometry::{Rect, Sides, Size};

pub mod cache;
pub mod overlay;
pub mod pager;

pub use cache::{PlanCache, PlanCacheStats};
pub use overlay::{PanelAnchor, PanelPlacement, PanelPositioner, PanelSize};
pub use pager::{PageMarker, PagePlanner};
