#![forbid(unsafe_code)]

//! Floating panel placement for anchored overlays.
//!
//! [`PanelPositioner`] places a floating panel (dropdown list, picker
//! column set, autocomplete menu) relative to a trigger rectangle inside a
//! viewport. The panel left-aligns with the trigger, sliding back inside
//! the viewport's margin band when it would overflow the right edge, and
//! opens below the trigger unless the space above is strictly more useful.
//!
//! The result is a [`PanelPlacement`], not a finished rectangle: panels
//! size their height to content at render time, so the placement carries
//! the anchoring rule and a height budget. [`PanelPlacement::resolve`]
//! turns it into a concrete [`Rect`] once the rendered size is known.

use corbel_core::geometry::{Rect, Size};
use serde::{Deserialize, Serialize};

/// Default gap between the trigger and the panel, in pixels.
pub const DEFAULT_SPACING: i32 = 4;

/// Default margin kept between the panel and the viewport edges, in pixels.
pub const DEFAULT_EDGE_MARGIN: i32 = 16;

/// Desired panel extent: fixed width, content-estimated height ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PanelSize {
    /// Panel width in pixels.
    pub width: i32,
    /// Estimated maximum content height in pixels.
    pub max_height: i32,
}

impl PanelSize {
    /// Create a new panel size.
    #[inline]
    #[must_use]
    pub const fn new(width: i32, max_height: i32) -> Self {
        Self { width, max_height }
    }
}

/// How the `top` coordinate of a placement anchors the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PanelAnchor {
    /// `top` is the panel's top edge; the panel grows downward.
    TopAligned,
    /// `top` is the panel's bottom edge; the panel grows upward, so the
    /// consumer offsets by the rendered height.
    BottomAligned,
}

/// A resolved panel position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PanelPlacement {
    /// Left edge of the panel.
    pub left: i32,
    /// Anchoring coordinate; see [`PanelAnchor`].
    pub top: i32,
    /// Height budget for the panel, never negative.
    pub max_height: i32,
    /// Which edge `top` refers to.
    pub anchor: PanelAnchor,
}

impl PanelPlacement {
    /// Concrete rectangle for a panel rendered at `size`.
    ///
    /// The height is clamped to the placement's budget; a bottom-aligned
    /// placement is offset upward by the clamped height.
    #[must_use]
    pub fn resolve(&self, size: Size) -> Rect {
        let height = size.height.min(self.max_height).max(0);
        let top = match self.anchor {
            PanelAnchor::TopAligned => self.top,
            PanelAnchor::BottomAligned => self.top - height,
        };
        Rect::new(self.left, top, size.width, height)
    }
}

/// Places floating panels against a viewport.
///
/// `spacing` is the gap between trigger and panel; `edge_margin` is the
/// exclusion band along every viewport edge that panels stay out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelPositioner {
    spacing: i32,
    edge_margin: i32,
}

impl Default for PanelPositioner {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelPositioner {
    /// Create a positioner with the default spacing and edge margin.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            spacing: DEFAULT_SPACING,
            edge_margin: DEFAULT_EDGE_MARGIN,
        }
    }

    /// Set the gap between the trigger and the panel.
    #[must_use]
    pub const fn spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the margin kept between the panel and the viewport edges.
    #[must_use]
    pub const fn edge_margin(mut self, edge_margin: i32) -> Self {
        self.edge_margin = edge_margin;
        self
    }

    /// Place a panel of `panel` extent near `trigger` inside `viewport`.
    ///
    /// Horizontally the panel left-aligns with the trigger and slides left
    /// when it would cross the right margin, never starting left of the
    /// margin itself. Vertically it opens below when the space below fits
    /// the estimated height or beats the space above (ties open downward),
    /// and otherwise opens above, bottom-aligned. The height budget is the
    /// available space on the chosen side, capped by the estimate and
    /// clamped at zero for degenerate viewports.
    #[must_use]
    pub fn place(&self, trigger: Rect, viewport: Size, panel: PanelSize) -> PanelPlacement {
        let mut left = trigger.x;
        if left + panel.width > viewport.width - self.edge_margin {
            left = self
                .edge_margin
                .max(viewport.width - panel.width - self.edge_margin);
        }
        left = left.max(self.edge_margin);

        let space_below = viewport.height - trigger.bottom() - self.spacing - self.edge_margin;
        let space_above = trigger.y - self.spacing - self.edge_margin;

        if space_below >= panel.max_height || space_below >= space_above {
            PanelPlacement {
                left,
                top: trigger.bottom() + self.spacing,
                max_height: panel.max_height.min(space_below).max(0),
                anchor: PanelAnchor::TopAligned,
            }
        } else {
            PanelPlacement {
                left,
                top: trigger.y - self.spacing,
                max_height: panel.max_height.min(space_above).max(0),
                anchor: PanelAnchor::BottomAligned,
            }
        }
    }
}

/// Place a panel with the default spacing and edge margin.
///
/// # Examples
///
/// ```
/// use corbel_core::geometry::{Rect, Size};
/// use corbel_layout::overlay::{place, PanelAnchor, PanelSize};
///
/// // A trigger near the bottom of the screen: the panel opens upward.
/// let placement = place(
///     Rect::new(10, 500, 100, 30),
///     Size::new(800, 600),
///     PanelSize::new(160, 200),
/// );
/// assert_eq!(placement.anchor, PanelAnchor::BottomAligned);
/// assert_eq!(placement.top, 496);
/// assert_eq!(placement.max_height, 200);
/// ```
#[must_use]
pub fn place(trigger: Rect, viewport: Size, panel: PanelSize) -> PanelPlacement {
    PanelPositioner::new().place(trigger, viewport, panel)
}
