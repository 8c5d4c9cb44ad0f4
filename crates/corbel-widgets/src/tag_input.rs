#![forbid(unsafe_code)]

//! Headless tag editor: a committed tag list plus a draft being typed.
//!
//! [`TagInput`] holds the validation rules; [`TagInputState`] holds the
//! tags and the draft text. Characters flow in through [`TagInput::push_char`]
//! (separator characters commit the draft), pasted text through
//! [`TagInput::paste`]. Rejected commits leave the draft in place so the
//! user can fix it; rejected paste pieces are discarded.
//!
//! Length limits count grapheme clusters, not bytes or code points, so a
//! flag emoji or a combining sequence is one "character" to the limit.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use corbel_core::event::{KeyCode, KeyEvent};

/// Why a draft was not committed as a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagRejection {
    /// The trimmed draft was empty.
    Empty,
    /// The draft exceeds the grapheme limit.
    TooLong {
        /// Maximum tag length in grapheme clusters.
        limit: usize,
    },
    /// An equal tag is already present.
    Duplicate,
    /// The tag list is full.
    LimitReached {
        /// Maximum number of tags.
        limit: usize,
    },
}

impl std::fmt::Display for TagRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TagRejection::Empty => write!(f, "tag is empty"),
            TagRejection::TooLong { limit } => {
                write!(f, "tag exceeds {limit} characters")
            }
            TagRejection::Duplicate => write!(f, "tag already present"),
            TagRejection::LimitReached { limit } => {
                write!(f, "tag limit of {limit} reached")
            }
        }
    }
}

impl std::error::Error for TagRejection {}

/// Tag editor state: committed tags plus the draft being typed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct TagInputState {
    tags: Vec<String>,
    draft: String,
}

impl TagInputState {
    /// Create an empty state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tags: Vec::new(),
            draft: String::new(),
        }
    }

    /// Create a state seeded with existing tags.
    ///
    /// Seeds are taken as-is; validation applies to new input only.
    #[must_use]
    pub fn from_tags(tags: Vec<String>) -> Self {
        Self {
            tags,
            draft: String::new(),
        }
    }

    /// The committed tags, in insertion order.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// The uncommitted draft text.
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }
}

/// Tag editor configuration: limits and separator characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInput {
    max_tags: Option<usize>,
    max_tag_len: Option<usize>,
    allow_duplicates: bool,
    separators: Vec<char>,
}

impl Default for TagInput {
    fn default() -> Self {
        Self::new()
    }
}

impl TagInput {
    /// Create a tag input with no limits and `,` as the separator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_tags: None,
            max_tag_len: None,
            allow_duplicates: false,
            separators: vec![','],
        }
    }

    /// Cap the number of tags.
    #[must_use]
    pub const fn max_tags(mut self, limit: usize) -> Self {
        self.max_tags = Some(limit);
        self
    }

    /// Cap tag length, counted in grapheme clusters.
    #[must_use]
    pub const fn max_tag_len(mut self, limit: usize) -> Self {
        self.max_tag_len = Some(limit);
        self
    }

    /// Allow the same tag to appear more than once.
    #[must_use]
    pub const fn allow_duplicates(mut self, allow: bool) -> Self {
        self.allow_duplicates = allow;
        self
    }

    /// Replace the separator characters that commit the draft.
    #[must_use]
    pub fn separators(mut self, separators: Vec<char>) -> Self {
        self.separators = separators;
        self
    }

    /// Feed one typed character.
    ///
    /// Separator characters commit the draft and report the result; a
    /// separator over a blank draft is a silent no-op. Any other character
    /// joins the draft and returns `None`.
    pub fn push_char(
        &self,
        state: &mut TagInputState,
        c: char,
    ) -> Option<Result<(), TagRejection>> {
        if self.separators.contains(&c) {
            if state.draft.trim().is_empty() {
                state.draft.clear();
                return None;
            }
            return Some(self.commit(state));
        }
        state.draft.push(c);
        None
    }

    /// Delete backwards: the draft's last grapheme, or with an empty
    /// draft the last tag, which is returned.
    pub fn backspace(&self, state: &mut TagInputState) -> Option<String> {
        if let Some((offset, _)) = state.draft.grapheme_indices(true).last() {
            state.draft.truncate(offset);
            return None;
        }
        state.tags.pop()
    }

    /// Commit the trimmed draft as a tag.
    ///
    /// On success the draft clears; on rejection it stays for the user to
    /// fix. Duplicates compare by exact string equality.
    pub fn commit(&self, state: &mut TagInputState) -> Result<(), TagRejection> {
        let tag = state.draft.trim();
        if tag.is_empty() {
            return Err(TagRejection::Empty);
        }
        if let Some(limit) = self.max_tag_len
            && tag.graphemes(true).count() > limit
        {
            return Err(TagRejection::TooLong { limit });
        }
        if !self.allow_duplicates && state.tags.iter().any(|existing| existing == tag) {
            return Err(TagRejection::Duplicate);
        }
        if let Some(limit) = self.max_tags
            && state.tags.len() >= limit
        {
            return Err(TagRejection::LimitReached { limit });
        }
        state.tags.push(tag.to_string());
        state.draft.clear();
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "tag_input.commit", count = state.tags.len());
        Ok(())
    }

    /// Remove the tag at `index`, returning it. Out-of-range is a no-op.
    pub fn remove(&self, state: &mut TagInputState, index: usize) -> Option<String> {
        if index < state.tags.len() {
            Some(state.tags.remove(index))
        } else {
            None
        }
    }

    /// Paste text, splitting on separators and line breaks.
    ///
    /// The first piece continues the current draft. Every piece commits,
    /// including the last; rejected pieces are discarded. Returns the
    /// number of tags accepted.
    pub fn paste(&self, state: &mut TagInputState, text: &str) -> usize {
        let mut accepted = 0;
        for piece in text.split(|c: char| c == '\n' || c == '\r' || self.separators.contains(&c)) {
            state.draft.push_str(piece);
            if state.draft.trim().is_empty() {
                state.draft.clear();
                continue;
            }
            if self.commit(state).is_ok() {
                accepted += 1;
            } else {
                state.draft.clear();
            }
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "tag_input.paste", accepted);
        accepted
    }

    /// Handle a key event.
    ///
    /// Typed characters are always consumed and return `true`; `Enter`
    /// returns whether the commit succeeded; `Backspace` returns whether
    /// there was anything to delete.
    pub fn handle_key(&self, state: &mut TagInputState, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) => {
                self.push_char(state, c);
                true
            }
            KeyCode::Enter => self.commit(state).is_ok(),
            KeyCode::Backspace => {
                let had_content = !state.draft.is_empty() || !state.tags.is_empty();
                self.backspace(state);
                had_content
            }
            _ => false,
        }
    }

    /// Terminal-cell width of all tags plus the draft.
    ///
    /// A sizing hint for embedders laying out a pill row; separators and
    /// decoration are theirs to add.
    #[must_use]
    pub fn display_width(&self, state: &TagInputState) -> usize {
        state.tags.iter().map(|tag| tag.width()).sum::<usize>() + state.draft.width()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(input: &TagInput, state: &mut TagInputState, text: &str) {
        for c in text.chars() {
            input.push_char(state, c);
        }
    }

    // --- typing tests ---

    #[test]
    fn characters_build_the_draft() {
        let input = TagInput::new();
        let mut state = TagInputState::new();
        typed(&input, &mut state, "rust");
        assert_eq!(state.draft(), "rust");
        assert!(state.tags().is_empty());
    }

    #[test]
    fn separator_commits_the_draft() {
        let input = TagInput::new();
        let mut state = TagInputState::new();
        typed(&input, &mut state, "rust,");
        assert_eq!(state.tags(), ["rust"]);
        assert_eq!(state.draft(), "");
    }

    #[test]
    fn separator_over_blank_draft_is_silent() {
        let input = TagInput::new();
        let mut state = TagInputState::new();
        assert_eq!(input.push_char(&mut state, ','), None);
        typed(&input, &mut state, "   ");
        assert_eq!(input.push_char(&mut state, ','), None);
        assert_eq!(state.draft(), "");
        assert!(state.tags().is_empty());
    }

    #[test]
    fn custom_separators() {
        let input = TagInput::new().separators(vec![';', ' ']);
        let mut state = TagInputState::new();
        typed(&input, &mut state, "a;b c,d");
        assert_eq!(state.tags(), ["a", "b"]);
        assert_eq!(state.draft(), "c,d");
    }

    // --- commit tests ---

    #[test]
    fn commit_trims_whitespace() {
        let input = TagInput::new();
        let mut state = TagInputState::new();
        typed(&input, &mut state, "  rust  ");
        assert_eq!(input.commit(&mut state), Ok(()));
        assert_eq!(state.tags(), ["rust"]);
    }

    #[test]
    fn commit_rejects_empty_draft() {
        let input = TagInput::new();
        let mut state = TagInputState::new();
        assert_eq!(input.commit(&mut state), Err(TagRejection::Empty));
    }

    #[test]
    fn commit_rejects_over_long_tags_by_grapheme() {
        let input = TagInput::new().max_tag_len(3);
        let mut state = TagInputState::new();
        typed(&input, &mut state, "abcd");
        assert_eq!(
            input.commit(&mut state),
            Err(TagRejection::TooLong { limit: 3 })
        );
        // Rejection keeps the draft for fixing.
        assert_eq!(state.draft(), "abcd");

        // One combining sequence is one grapheme.
        let input = TagInput::new().max_tag_len(1);
        let mut state = TagInputState::new();
        typed(&input, &mut state, "e\u{301}");
        assert_eq!(input.commit(&mut state), Ok(()));
        assert_eq!(state.tags(), ["e\u{301}"]);
    }

    #[test]
    fn commit_rejects_duplicates_unless_allowed() {
        let input = TagInput::new();
        let mut state = TagInputState::new();
        typed(&input, &mut state, "rust,rust");
        assert_eq!(input.commit(&mut state), Err(TagRejection::Duplicate));
        assert_eq!(state.tags(), ["rust"]);

        let relaxed = TagInput::new().allow_duplicates(true);
        assert_eq!(relaxed.commit(&mut state), Ok(()));
        assert_eq!(state.tags(), ["rust", "rust"]);
    }

    #[test]
    fn commit_rejects_when_full() {
        let input = TagInput::new().max_tags(2);
        let mut state = TagInputState::new();
        typed(&input, &mut state, "a,b,c");
        assert_eq!(
            input.commit(&mut state),
            Err(TagRejection::LimitReached { limit: 2 })
        );
        assert_eq!(state.tags(), ["a", "b"]);
        assert_eq!(state.draft(), "c");
    }

    // --- backspace tests ---

    #[test]
    fn backspace_eats_a_whole_grapheme() {
        let input = TagInput::new();
        let mut state = TagInputState::new();
        typed(&input, &mut state, "xe\u{301}");
        assert_eq!(input.backspace(&mut state), None);
        assert_eq!(state.draft(), "x");
    }

    #[test]
    fn backspace_on_empty_draft_pops_last_tag() {
        let input = TagInput::new();
        let mut state = TagInputState::new();
        typed(&input, &mut state, "a,b,");
        assert_eq!(input.backspace(&mut state), Some("b".to_string()));
        assert_eq!(state.tags(), ["a"]);
        assert_eq!(input.backspace(&mut state), Some("a".to_string()));
        assert_eq!(input.backspace(&mut state), None);
    }

    // --- remove tests ---

    #[test]
    fn remove_is_bounds_checked() {
        let input = TagInput::new();
        let mut state = TagInputState::from_tags(vec!["a".into(), "b".into()]);
        assert_eq!(input.remove(&mut state, 0), Some("a".to_string()));
        assert_eq!(state.tags(), ["b"]);
        assert_eq!(input.remove(&mut state, 5), None);
    }

    // --- paste tests ---

    #[test]
    fn paste_splits_and_counts_accepted() {
        let input = TagInput::new();
        let mut state = TagInputState::new();
        assert_eq!(input.paste(&mut state, "alpha, beta,, gamma"), 3);
        assert_eq!(state.tags(), ["alpha", "beta", "gamma"]);
        assert_eq!(state.draft(), "");
    }

    #[test]
    fn paste_splits_on_line_breaks() {
        let input = TagInput::new();
        let mut state = TagInputState::new();
        assert_eq!(input.paste(&mut state, "a\nb\r\nc"), 3);
        assert_eq!(state.tags(), ["a", "b", "c"]);
    }

    #[test]
    fn paste_discards_rejected_pieces() {
        let input = TagInput::new();
        let mut state = TagInputState::new();
        assert_eq!(input.paste(&mut state, "x,x,y"), 2);
        assert_eq!(state.tags(), ["x", "y"]);
        assert_eq!(state.draft(), "");
    }

    #[test]
    fn paste_continues_the_draft() {
        let input = TagInput::new();
        let mut state = TagInputState::new();
        typed(&input, &mut state, "ru");
        assert_eq!(input.paste(&mut state, "st,go"), 2);
        assert_eq!(state.tags(), ["rust", "go"]);
    }

    // --- key handling tests ---

    #[test]
    fn keys_route_to_operations() {
        let input = TagInput::new();
        let mut state = TagInputState::new();
        assert!(input.handle_key(&mut state, &KeyEvent::new(KeyCode::Char('a'))));
        assert!(input.handle_key(&mut state, &KeyEvent::new(KeyCode::Enter)));
        assert_eq!(state.tags(), ["a"]);
        assert!(!input.handle_key(&mut state, &KeyEvent::new(KeyCode::Enter)));
        assert!(input.handle_key(&mut state, &KeyEvent::new(KeyCode::Backspace)));
        assert!(state.tags().is_empty());
        assert!(!input.handle_key(&mut state, &KeyEvent::new(KeyCode::Backspace)));
        assert!(!input.handle_key(&mut state, &KeyEvent::new(KeyCode::Up)));
    }

    // --- width tests ---

    #[test]
    fn display_width_counts_terminal_cells() {
        let input = TagInput::new();
        let mut state = TagInputState::from_tags(vec!["日本".into(), "ab".into()]);
        typed(&input, &mut state, "xy");
        // CJK is double width: 4 + 2 + 2.
        assert_eq!(input.display_width(&state), 8);
    }

    // --- rejection display tests ---

    #[test]
    fn rejections_render_messages() {
        assert_eq!(TagRejection::Empty.to_string(), "tag is empty");
        assert_eq!(
            TagRejection::TooLong { limit: 8 }.to_string(),
            "tag exceeds 8 characters"
        );
        assert_eq!(TagRejection::Duplicate.to_string(), "tag already present");
        assert_eq!(
            TagRejection::LimitReached { limit: 4 }.to_string(),
            "tag limit of 4 reached"
        );
    }

    // --- persistence tests ---

    #[cfg(feature = "state-persistence")]
    #[test]
    fn state_round_trips_through_json() {
        let input = TagInput::new();
        let mut state = TagInputState::new();
        input.paste(&mut state, "a,b");
        typed(&input, &mut state, "dra");

        let json = serde_json::to_string(&state).unwrap();
        let back: TagInputState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
