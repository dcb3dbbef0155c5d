//! Editor model: the document [`TextState`] plus the UI-only [`ViewState`].
//!
//! `TextState` (from `core-state`) owns the document and its history.
//! Everything else the screen reflects lives in `ViewState`: theme, font
//! size, alignment, the search box, the auto-save toggle, the "last saved"
//! display string, the cursor, the find selection, the active prompt and an
//! ephemeral status message. None of the view fields are persisted.
//!
//! Invariants (must hold after every public call):
//! * `view.cursor <= text.character_count()`.
//! * An active `view.selection` lies within the text and is non-empty.
//! * `view.scroll_top` is a valid line index.
//!
//! Whole-text replacements (undo, redo, upload, restore) go through
//! [`EditorModel::replace_all`] / [`EditorModel::after_history_move`], which
//! move the cursor to the end and drop the selection, mirroring what a text
//! area does when its value is replaced programmatically.

use core_config::{Alignment, Config, FontSize, Theme};
use core_state::TextState;
use std::time::{Duration, Instant};

/// Display value of `last_saved` before the first save.
pub const NOT_SAVED_YET: &str = "Not saved yet";

/// How long status messages stay visible.
pub const STATUS_TTL: Duration = Duration::from_secs(4);

/// Half-open char range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Normalizes ordering; returns `None` for an empty range.
    pub fn new(a: usize, b: usize) -> Option<Self> {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        (start < end).then_some(Self { start, end })
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, idx: usize) -> bool {
        idx >= self.start && idx < self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Find,
    Upload,
}

impl PromptKind {
    pub fn label(self) -> &'static str {
        match self {
            PromptKind::Find => "Find",
            PromptKind::Upload => "Upload file",
        }
    }
}

/// Single-line entry shown in place of the footer while active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub buffer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub expires_at: Instant,
}

/// UI-only state owned by the view layer.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub theme: Theme,
    pub font_size: FontSize,
    pub alignment: Alignment,
    pub search_query: String,
    pub autosave: bool,
    pub last_saved: String,
    pub cursor: usize,
    pub selection: Option<Selection>,
    pub prompt: Option<Prompt>,
    pub status: Option<StatusMessage>,
    pub scroll_top: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            font_size: FontSize::default(),
            alignment: Alignment::default(),
            search_query: String::new(),
            autosave: true,
            last_saved: NOT_SAVED_YET.to_string(),
            cursor: 0,
            selection: None,
            prompt: None,
            status: None,
            scroll_top: 0,
        }
    }
}

impl ViewState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            theme: config.theme(),
            font_size: config.font_size,
            alignment: config.alignment(),
            autosave: config.autosave().enabled,
            ..Self::default()
        }
    }

    pub fn set_status<S: Into<String>>(&mut self, level: StatusLevel, msg: S, now: Instant) {
        self.status = Some(StatusMessage {
            text: msg.into(),
            level,
            expires_at: now + STATUS_TTL,
        });
    }

    pub fn info<S: Into<String>>(&mut self, msg: S) {
        self.set_status(StatusLevel::Info, msg, Instant::now());
    }

    pub fn error<S: Into<String>>(&mut self, msg: S) {
        self.set_status(StatusLevel::Error, msg, Instant::now());
    }

    /// Clear an expired status message; true when one was removed.
    pub fn tick_status(&mut self, now: Instant) -> bool {
        if let Some(m) = &self.status
            && now >= m.expires_at
        {
            self.status = None;
            return true;
        }
        false
    }

    pub fn prompt_active(&self) -> bool {
        self.prompt.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct EditorModel {
    pub text: TextState,
    pub view: ViewState,
}

impl EditorModel {
    pub fn new(view: ViewState) -> Self {
        Self {
            text: TextState::new(),
            view,
        }
    }

    pub fn char_len(&self) -> usize {
        self.text.character_count()
    }

    /// Apply `new_text` as a fresh edit and place the cursor at `cursor`.
    pub fn apply_edit(&mut self, new_text: String, cursor: usize) {
        self.text.set_text(new_text);
        self.view.selection = None;
        self.view.cursor = cursor.min(self.char_len());
    }

    /// Fresh edit replacing the whole document (upload, restore).
    pub fn replace_all(&mut self, new_text: String) {
        self.text.set_text(new_text);
        self.after_history_move();
    }

    /// Reset cursor/selection after the text was swapped wholesale.
    pub fn after_history_move(&mut self) {
        self.view.selection = None;
        self.view.cursor = self.char_len();
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.char_len();
        if self.view.cursor > len {
            self.view.cursor = len;
        }
        if let Some(sel) = self.view.selection
            && sel.end > len
        {
            self.view.selection = Selection::new(sel.start.min(len), len);
        }
    }

    /// Adjust `scroll_top` so the cursor line is visible in `text_rows` rows.
    /// Returns true when the viewport moved.
    pub fn auto_scroll(&mut self, text_rows: usize) -> bool {
        if text_rows == 0 {
            return false;
        }
        let line = core_text::line_col(self.text.text(), self.view.cursor).line;
        let before = self.view.scroll_top;
        if line < self.view.scroll_top {
            self.view.scroll_top = line;
        } else if line >= self.view.scroll_top + text_rows {
            self.view.scroll_top = line + 1 - text_rows;
        }
        let last_line = self.text.line_count() - 1;
        self.view.scroll_top = self.view.scroll_top.min(last_line);
        self.view.scroll_top != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_view_reflects_initial_toggles() {
        let view = ViewState::default();
        assert_eq!(view.theme, Theme::Dark);
        assert_eq!(view.font_size.px(), 16);
        assert_eq!(view.alignment, Alignment::Left);
        assert!(view.autosave);
        assert_eq!(view.last_saved, NOT_SAVED_YET);
        assert!(view.search_query.is_empty());
    }

    #[test]
    fn selection_normalizes_and_rejects_empty() {
        assert_eq!(Selection::new(5, 2), Some(Selection { start: 2, end: 5 }));
        assert_eq!(Selection::new(3, 3), None);
        let sel = Selection::new(1, 4).unwrap();
        assert!(sel.contains(1) && sel.contains(3) && !sel.contains(4));
        assert_eq!(sel.len(), 3);
    }

    #[test]
    fn status_lifecycle() {
        let mut view = ViewState::default();
        let now = Instant::now();
        view.set_status(StatusLevel::Info, "Saved", now);
        assert!(!view.tick_status(now));
        assert!(view.tick_status(now + STATUS_TTL));
        assert!(view.status.is_none());
    }

    #[test]
    fn replace_all_moves_cursor_to_end() {
        let mut model = EditorModel::default();
        model.view.selection = Selection::new(0, 1);
        model.replace_all("hello".into());
        assert_eq!(model.view.cursor, 5);
        assert!(model.view.selection.is_none());
        assert_eq!(model.text.undo_depth(), 1);
    }

    #[test]
    fn auto_scroll_follows_cursor() {
        let mut model = EditorModel::default();
        model.replace_all("0\n1\n2\n3\n4\n5\n6\n7\n8\n9".into());
        assert!(model.auto_scroll(4));
        assert_eq!(model.view.scroll_top, 6);
        model.view.cursor = 0;
        assert!(model.auto_scroll(4));
        assert_eq!(model.view.scroll_top, 0);
        assert!(!model.auto_scroll(4));
    }

    #[test]
    fn clamp_cursor_after_shrink() {
        let mut model = EditorModel::default();
        model.replace_all("abcdef".into());
        model.view.selection = Selection::new(2, 6);
        model.text.undo();
        model.clamp_cursor();
        assert_eq!(model.view.cursor, 0);
        assert!(model.view.selection.is_none());
    }
}
