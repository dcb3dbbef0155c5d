//! Document text state: the current text, its undo/redo history, and the live counts.
//!
//! Every path that replaces the document (typing, paste, upload, restore from
//! storage) goes through [`TextState::set_text`], which records the previous
//! text as a *fresh edit*: it is pushed onto the undo stack and the redo stack
//! is discarded. [`TextState::undo`] and [`TextState::redo`] move between
//! recorded snapshots without creating new history.
//!
//! History is kept as whole-text snapshots (see [`undo::UndoEngine`]). Counts
//! are derived from the text on demand; there is no secondary per-character
//! structure to keep in sync, so the character count always equals the number
//! of Unicode scalar values in the current text.
//!
//! Telemetry: snapshot lifecycle emits `state.undo` trace events
//! (`push_snapshot`, `undo_pop`, `redo_pop`, redo clear). Text content is never
//! logged, only byte lengths.

use std::borrow::Cow;

pub mod undo;
pub use undo::UndoEngine;

use tracing::debug;

#[derive(Debug, Default, Clone)]
pub struct TextState {
    current: String,
    undo: UndoEngine,
}

impl TextState {
    /// Empty document with no history.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.current
    }

    /// Replace the document as a fresh edit.
    pub fn set_text(&mut self, new_text: impl Into<String>) {
        let new_text = new_text.into();
        let previous = std::mem::replace(&mut self.current, new_text);
        self.undo.push_fresh_edit(previous);
        debug!(target: "state.text", bytes = self.current.len(), "set_text");
    }

    /// Restore the most recent undo snapshot. Returns false (disabled) when the
    /// undo stack is empty.
    pub fn undo(&mut self) -> bool {
        self.undo.undo(&mut self.current)
    }

    /// Re-apply the most recently undone snapshot. Returns false (disabled) when
    /// the redo stack is empty.
    pub fn redo(&mut self) -> bool {
        self.undo.redo(&mut self.current)
    }

    pub fn can_undo(&self) -> bool {
        self.undo.undo_depth() > 0
    }
    pub fn can_redo(&self) -> bool {
        self.undo.redo_depth() > 0
    }
    pub fn undo_depth(&self) -> usize {
        self.undo.undo_depth()
    }
    pub fn redo_depth(&self) -> usize {
        self.undo.redo_depth()
    }
    pub fn undo_stack(&self) -> &[String] {
        self.undo.undo_stack()
    }
    pub fn redo_stack(&self) -> &[String] {
        self.undo.redo_stack()
    }

    /// Number of Unicode scalar values in the current text.
    pub fn character_count(&self) -> usize {
        self.current.chars().count()
    }

    /// Number of whitespace-separated words; whitespace-only text has none.
    pub fn word_count(&self) -> usize {
        word_count(&self.current)
    }

    /// `1 + number of '\n'`; the empty document has one line.
    pub fn line_count(&self) -> usize {
        line_count(&self.current)
    }

    pub fn counts(&self) -> Counts {
        Counts {
            characters: self.character_count(),
            words: self.word_count(),
            lines: self.line_count(),
        }
    }
}

/// Snapshot of the live document counts shown in the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counts {
    pub characters: usize,
    pub words: usize,
    pub lines: usize,
}

pub fn word_count(text: &str) -> usize {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0;
    }
    trimmed.split_whitespace().count()
}

pub fn line_count(text: &str) -> usize {
    1 + text.bytes().filter(|b| *b == b'\n').count()
}

/// Convert CRLF and lone CR line endings to LF. Borrowed when nothing changes.
pub fn normalize_line_endings(input: &str) -> Cow<'_, str> {
    if !input.contains('\r') {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' {
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            out.push('\n');
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}
