#![forbid(unsafe_code)]

//! Headless cascading select: hierarchical options in columns.
//!
//! A cascader shows one column per expanded level of an option tree.
//! Highlighting rides the deepest open column; expanding a branch opens
//! its children in a new column to the right, which widens the floating
//! panel and re-runs placement. [`Cascader`] owns the option tree and the
//! geometry parameters; [`CascaderState`] owns what the user has opened,
//! highlighted, and committed.
//!
//! The widget never draws. Views take [`Cascader::columns`] for content,
//! [`Cascader::placement`] for where the panel goes, and
//! [`Cascader::column_rects`] / [`Cascader::row_at`] to map pointer
//! positions back onto rows.

use corbel_core::event::{KeyCode, KeyEvent};
use corbel_core::geometry::{Point, Rect, Sides, Size};
use corbel_layout::overlay::{PanelPlacement, PanelPositioner, PanelSize};

/// Default column width in pixels.
pub const DEFAULT_COLUMN_WIDTH: i32 = 160;

/// Default row height in pixels.
pub const DEFAULT_ROW_HEIGHT: i32 = 28;

/// Default number of rows visible before a column scrolls.
pub const DEFAULT_MAX_VISIBLE_ROWS: usize = 8;

/// Default padding inside the panel, in pixels.
pub const DEFAULT_PANEL_PADDING: i32 = 4;

/// One option in a cascader tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascaderOption {
    value: String,
    label: String,
    disabled: bool,
    children: Vec<CascaderOption>,
}

impl CascaderOption {
    /// Create an option with a stable value and a display label.
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
            children: Vec::new(),
        }
    }

    /// Append a child option.
    #[must_use]
    pub fn child(mut self, child: CascaderOption) -> Self {
        self.children.push(child);
        self
    }

    /// Replace the children wholesale.
    #[must_use]
    pub fn with_children(mut self, children: Vec<CascaderOption>) -> Self {
        self.children = children;
        self
    }

    /// Mark the option disabled.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// The stable value used for programmatic selection.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the option can be highlighted or committed.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Whether this option expands into another column.
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Child options.
    #[must_use]
    pub fn children(&self) -> &[CascaderOption] {
        &self.children
    }
}

/// One visible column of the cascader panel.
#[derive(Debug, Clone, Copy)]
pub struct CascaderColumn<'a> {
    /// The options this column lists.
    pub options: &'a [CascaderOption],
    /// Row expanded into the next column, for every column but the deepest.
    pub expanded: Option<usize>,
    /// Focused row, on the deepest column only.
    pub highlighted: Option<usize>,
}

/// What a key event did to the cascader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CascaderOutcome {
    /// Nothing changed.
    Ignored,
    /// The highlight moved.
    Navigated,
    /// A branch opened a new column.
    Expanded,
    /// The deepest column closed.
    Collapsed,
    /// A leaf was committed; the panel is now closed.
    Committed(Vec<usize>),
    /// The panel was dismissed without committing.
    Dismissed,
}

/// Cascader state: what is open, highlighted, and committed.
///
/// `path` holds the chain of expanded row indices; `highlight` is the
/// focused row of the deepest open column. Both are transient panel state
/// and only ever mutated through [`Cascader`] operations, which keep them
/// valid against the option tree. `selected` survives closing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CascaderState {
    open: bool,
    trigger: Rect,
    path: Vec<usize>,
    highlight: usize,
    selected: Option<Vec<usize>>,
}

impl CascaderState {
    /// Whether the panel is open.
    #[inline]
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// The trigger rectangle the panel is anchored to.
    #[inline]
    #[must_use]
    pub const fn trigger(&self) -> Rect {
        self.trigger
    }

    /// The chain of expanded row indices.
    #[must_use]
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Focused row of the deepest open column.
    #[inline]
    #[must_use]
    pub const fn highlight(&self) -> usize {
        self.highlight
    }

    /// The committed selection, as row indices per level.
    #[must_use]
    pub fn selected(&self) -> Option<&[usize]> {
        self.selected.as_deref()
    }

    /// Extract the state worth persisting across sessions.
    #[must_use]
    pub fn persist(&self) -> CascaderPersistState {
        CascaderPersistState {
            selected: self.selected.clone(),
        }
    }

    /// Restore persisted state. The panel comes back closed.
    pub fn restore(&mut self, persisted: CascaderPersistState) {
        self.open = false;
        self.path.clear();
        self.highlight = 0;
        self.selected = persisted.selected;
    }
}

/// Persistable state for a [`CascaderState`].
///
/// Contains the user-facing state that should survive sessions. Transient
/// panel state (open flag, trigger, highlight) is deliberately absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct CascaderPersistState {
    /// Committed selection, as row indices per level.
    pub selected: Option<Vec<usize>>,
}

/// Cascader widget configuration.
#[derive(Debug, Clone)]
pub struct Cascader {
    options: Vec<CascaderOption>,
    column_width: i32,
    row_height: i32,
    max_visible_rows: usize,
    panel_padding: i32,
    positioner: PanelPositioner,
}

impl Cascader {
    /// Create a cascader over an option tree.
    #[must_use]
    pub fn new(options: Vec<CascaderOption>) -> Self {
        Self {
            options,
            column_width: DEFAULT_COLUMN_WIDTH,
            row_height: DEFAULT_ROW_HEIGHT,
            max_visible_rows: DEFAULT_MAX_VISIBLE_ROWS,
            panel_padding: DEFAULT_PANEL_PADDING,
            positioner: PanelPositioner::new(),
        }
    }

    /// Set the column width in pixels.
    #[must_use]
    pub const fn column_width(mut self, width: i32) -> Self {
        self.column_width = width;
        self
    }

    /// Set the row height in pixels.
    #[must_use]
    pub const fn row_height(mut self, height: i32) -> Self {
        self.row_height = height;
        self
    }

    /// Set how many rows are visible before a column scrolls.
    #[must_use]
    pub const fn max_visible_rows(mut self, rows: usize) -> Self {
        self.max_visible_rows = rows;
        self
    }

    /// Set the padding inside the panel.
    #[must_use]
    pub const fn panel_padding(mut self, padding: i32) -> Self {
        self.panel_padding = padding;
        self
    }

    /// Set the gap between the trigger and the panel.
    #[must_use]
    pub const fn spacing(mut self, spacing: i32) -> Self {
        self.positioner = self.positioner.spacing(spacing);
        self
    }

    /// Set the margin kept between the panel and the viewport edges.
    #[must_use]
    pub const fn edge_margin(mut self, edge_margin: i32) -> Self {
        self.positioner = self.positioner.edge_margin(edge_margin);
        self
    }

    /// The root options.
    #[must_use]
    pub fn options(&self) -> &[CascaderOption] {
        &self.options
    }

    // --- tree resolution ---

    /// The node a full index path points at, if the path is still valid.
    #[must_use]
    pub fn node_at(&self, path: &[usize]) -> Option<&CascaderOption> {
        let (&last, rest) = path.split_last()?;
        self.options_at(rest)?.get(last)
    }

    /// The option list `path` expansions lead to, if the path is valid.
    fn options_at(&self, path: &[usize]) -> Option<&[CascaderOption]> {
        let mut options = self.options.as_slice();
        for &index in path {
            options = options.get(index)?.children();
            if options.is_empty() {
                return None;
            }
        }
        Some(options)
    }

    /// Options of the deepest open column. Empty when the path is stale.
    fn active_options(&self, state: &CascaderState) -> &[CascaderOption] {
        self.options_at(&state.path).unwrap_or(&[])
    }

    // --- panel lifecycle ---

    /// Open the panel anchored to `trigger`.
    ///
    /// A still-valid committed selection is restored as the open path so
    /// the user resumes where they left off; otherwise the panel opens on
    /// the first enabled root.
    pub fn open_at(&self, state: &mut CascaderState, trigger: Rect) {
        state.open = true;
        state.trigger = trigger;
        match &state.selected {
            Some(selected) if self.node_at(selected).is_some() && !selected.is_empty() => {
                state.path = selected[..selected.len() - 1].to_vec();
                state.highlight = selected[selected.len() - 1];
            }
            _ => {
                state.path.clear();
                state.highlight = first_enabled(&self.options);
            }
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "cascader.open", restored = state.selected.is_some());
    }

    /// Close the panel, keeping the committed selection.
    pub fn close(&self, state: &mut CascaderState) {
        state.open = false;
        state.path.clear();
        state.highlight = 0;
    }

    // --- navigation ---

    /// Move the highlight down to the next enabled row.
    pub fn highlight_next(&self, state: &mut CascaderState) -> bool {
        let options = self.active_options(state);
        let next = options
            .iter()
            .enumerate()
            .skip(state.highlight + 1)
            .find(|(_, option)| !option.is_disabled())
            .map(|(index, _)| index);
        match next {
            Some(index) => {
                state.highlight = index;
                true
            }
            None => false,
        }
    }

    /// Move the highlight up to the previous enabled row.
    pub fn highlight_prev(&self, state: &mut CascaderState) -> bool {
        let options = self.active_options(state);
        let prev = options
            .iter()
            .enumerate()
            .take(state.highlight)
            .rev()
            .find(|(_, option)| !option.is_disabled())
            .map(|(index, _)| index);
        match prev {
            Some(index) => {
                state.highlight = index;
                true
            }
            None => false,
        }
    }

    /// Expand the highlighted branch into a new column.
    pub fn expand(&self, state: &mut CascaderState) -> bool {
        let Some(node) = self.active_options(state).get(state.highlight) else {
            return false;
        };
        if node.is_disabled() || !node.has_children() {
            return false;
        }
        let first = first_enabled(node.children());
        state.path.push(state.highlight);
        state.highlight = first;
        true
    }

    /// Drop the deepest column, moving the highlight back to the row it
    /// was expanded from.
    pub fn collapse(&self, state: &mut CascaderState) -> bool {
        match state.path.pop() {
            Some(row) => {
                state.highlight = row;
                true
            }
            None => false,
        }
    }

    /// Commit the highlighted leaf and close the panel.
    ///
    /// Branches and disabled rows do not commit.
    pub fn commit(&self, state: &mut CascaderState) -> Option<Vec<usize>> {
        let node = self.active_options(state).get(state.highlight)?;
        if node.is_disabled() || node.has_children() {
            return None;
        }
        let mut selected = state.path.clone();
        selected.push(state.highlight);
        state.selected = Some(selected.clone());
        self.close(state);
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "cascader.commit", depth = selected.len());
        Some(selected)
    }

    /// Handle a key event against an open panel.
    pub fn handle_key(&self, state: &mut CascaderState, key: &KeyEvent) -> CascaderOutcome {
        if !state.open {
            return CascaderOutcome::Ignored;
        }
        match key.code {
            KeyCode::Down => {
                if self.highlight_next(state) {
                    CascaderOutcome::Navigated
                } else {
                    CascaderOutcome::Ignored
                }
            }
            KeyCode::Up => {
                if self.highlight_prev(state) {
                    CascaderOutcome::Navigated
                } else {
                    CascaderOutcome::Ignored
                }
            }
            KeyCode::Right => {
                if self.expand(state) {
                    CascaderOutcome::Expanded
                } else {
                    CascaderOutcome::Ignored
                }
            }
            KeyCode::Left => {
                if self.collapse(state) {
                    CascaderOutcome::Collapsed
                } else {
                    CascaderOutcome::Ignored
                }
            }
            KeyCode::Enter => {
                let expandable = self
                    .active_options(state)
                    .get(state.highlight)
                    .is_some_and(|node| node.has_children() && !node.is_disabled());
                if expandable {
                    self.expand(state);
                    CascaderOutcome::Expanded
                } else {
                    match self.commit(state) {
                        Some(path) => CascaderOutcome::Committed(path),
                        None => CascaderOutcome::Ignored,
                    }
                }
            }
            KeyCode::Escape => {
                self.close(state);
                CascaderOutcome::Dismissed
            }
            _ => CascaderOutcome::Ignored,
        }
    }

    // --- programmatic selection ---

    /// Select an option by its value chain, e.g. `["eu", "de", "berlin"]`.
    ///
    /// The whole chain must exist and the final node must be enabled; the
    /// final node may be a branch. Returns whether the selection was set.
    pub fn select_values(&self, state: &mut CascaderState, values: &[&str]) -> bool {
        if values.is_empty() {
            return false;
        }
        let mut options = self.options.as_slice();
        let mut path = Vec::with_capacity(values.len());
        for (depth, value) in values.iter().enumerate() {
            let Some(index) = options.iter().position(|option| option.value() == *value) else {
                return false;
            };
            path.push(index);
            let node = &options[index];
            if depth + 1 == values.len() {
                if node.is_disabled() {
                    return false;
                }
            } else {
                options = node.children();
            }
        }
        state.selected = Some(path);
        true
    }

    /// The committed selection as values, if it is still valid.
    #[must_use]
    pub fn selected_values<'a>(&'a self, state: &CascaderState) -> Option<Vec<&'a str>> {
        self.resolve_selected(state, CascaderOption::value)
    }

    /// The committed selection as labels, if it is still valid.
    #[must_use]
    pub fn selected_labels<'a>(&'a self, state: &CascaderState) -> Option<Vec<&'a str>> {
        self.resolve_selected(state, CascaderOption::label)
    }

    fn resolve_selected<'a>(
        &'a self,
        state: &CascaderState,
        project: fn(&'a CascaderOption) -> &'a str,
    ) -> Option<Vec<&'a str>> {
        let selected = state.selected.as_ref()?;
        let mut options = self.options.as_slice();
        let mut resolved = Vec::with_capacity(selected.len());
        for (depth, &index) in selected.iter().enumerate() {
            let node = options.get(index)?;
            resolved.push(project(node));
            if depth + 1 < selected.len() {
                options = node.children();
            }
        }
        Some(resolved)
    }

    // --- geometry ---

    /// The visible columns: per-column options plus expanded/highlighted
    /// rows. Stale path segments are dropped rather than reported.
    #[must_use]
    pub fn columns(&self, state: &CascaderState) -> Vec<CascaderColumn<'_>> {
        let mut columns = Vec::with_capacity(state.path.len() + 1);
        let mut options = self.options.as_slice();
        for &expanded in &state.path {
            if expanded >= options.len() {
                return columns;
            }
            columns.push(CascaderColumn {
                options,
                expanded: Some(expanded),
                highlighted: None,
            });
            options = options[expanded].children();
            // A path can go stale when the same state is reused against a
            // rebuilt tree; truncate at the first invalid hop.
            if options.is_empty() {
                return columns;
            }
        }
        columns.push(CascaderColumn {
            options,
            expanded: None,
            highlighted: (!options.is_empty()).then(|| state.highlight.min(options.len() - 1)),
        });
        columns
    }

    /// Number of visible columns.
    #[must_use]
    pub fn column_count(&self, state: &CascaderState) -> usize {
        self.columns(state).len()
    }

    /// The floating panel extent for the current column set.
    ///
    /// Width grows and shrinks with the open columns, so expanding a
    /// branch re-runs placement with a wider panel.
    #[must_use]
    pub fn panel_size(&self, state: &CascaderState) -> PanelSize {
        let columns = self.column_count(state) as i32;
        PanelSize::new(
            columns * self.column_width + 2 * self.panel_padding,
            self.max_visible_rows as i32 * self.row_height + 2 * self.panel_padding,
        )
    }

    /// Where the open panel goes inside `viewport`. `None` when closed.
    #[must_use]
    pub fn placement(&self, state: &CascaderState, viewport: Size) -> Option<PanelPlacement> {
        if !state.open {
            return None;
        }
        Some(
            self.positioner
                .place(state.trigger, viewport, self.panel_size(state)),
        )
    }

    /// Split a resolved panel rectangle into per-column strips.
    #[must_use]
    pub fn column_rects(&self, state: &CascaderState, panel: Rect) -> Vec<Rect> {
        let interior = panel.inner(Sides::all(self.panel_padding));
        (0..self.column_count(state))
            .map(|index| {
                Rect::new(
                    interior.x + index as i32 * self.column_width,
                    interior.y,
                    self.column_width,
                    interior.height,
                )
            })
            .collect()
    }

    /// Map a pointer position inside a resolved panel onto a row.
    ///
    /// Returns `(column, row)` for positions over a real row. This is a
    /// pure geometry mapping; pointer plumbing stays with the embedder.
    #[must_use]
    pub fn row_at(&self, state: &CascaderState, panel: Rect, at: Point) -> Option<(usize, usize)> {
        if self.row_height <= 0 {
            return None;
        }
        let columns = self.columns(state);
        let rects = self.column_rects(state, panel);
        for (index, rect) in rects.iter().enumerate() {
            if rect.contains_point(at) {
                let row = ((at.y - rect.y) / self.row_height) as usize;
                if row < columns.get(index)?.options.len() {
                    return Some((index, row));
                }
                return None;
            }
        }
        None
    }
}

fn first_enabled(options: &[CascaderOption]) -> usize {
    options
        .iter()
        .position(|option| !option.is_disabled())
        .unwrap_or(0)
}
