#![forbid(unsafe_code)]

//! Corbel public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports common types from the internal crates and offers a
//! lightweight prelude for day-to-day usage.

// --- Core re-exports -------------------------------------------------------

pub use corbel_core::event::{KeyCode, KeyEvent, KeyEventKind, Modifiers};
pub use corbel_core::geometry::{Point, Rect, Sides, Size};

// --- Layout re-exports -----------------------------------------------------

pub use corbel_layout::cache::{PlanCache, PlanCacheStats};
pub use corbel_layout::overlay::{PanelAnchor, PanelPlacement, PanelPositioner, PanelSize};
pub use corbel_layout::pager::{PageMarker, PagePlanner};

// --- Widget re-exports -----------------------------------------------------

pub use corbel_widgets::cascader::{
    Cascader, CascaderColumn, CascaderOption, CascaderOutcome, CascaderPersistState, CascaderState,
};
pub use corbel_widgets::pagination::{PagerItem, Pagination, PaginationState};
pub use corbel_widgets::tag_input::{TagInput, TagInputState, TagRejection};
pub use corbel_widgets::upload::{UploadPolicy, UploadRejection};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Cascader, CascaderOption, CascaderOutcome, CascaderState, KeyCode, KeyEvent, Modifiers,
        PageMarker, PagePlanner, PagerItem, Pagination, PaginationState, PanelAnchor,
        PanelPlacement, PanelPositioner, PanelSize, Point, Rect, Sides, Size, TagInput,
        TagInputState, TagRejection, UploadPolicy, UploadRejection,
    };

    pub use crate::{core, layout, widgets};
}

pub use corbel_core as core;
pub use corbel_layout as layout;
pub use corbel_widgets as widgets;
