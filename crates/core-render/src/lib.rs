//! Frame composition and terminal emission.
//!
//! Screen layout, top to bottom:
//! - row 0: toolbar (theme, auto-save, font size, alignment, search query,
//!   undo/redo availability)
//! - rows 1..h-1: text area (theme colours, alignment, selection highlight)
//! - row h-1: footer with counts, last saved time and status message, or the
//!   active prompt
//!
//! Every frame is rebuilt in full from the model. A `Frame` is a list of
//! `Row`s made of styled `Span`s; the engine then translates rows into writer
//! commands in a single flush. Building and emitting are separate so the
//! composition can be tested without a terminal.
//!
//! Invariants:
//! - A row's printed width never exceeds the frame width.
//! - Grapheme clusters are never split when clipping.
//! - Tabs expand to the next multiple of `TAB_WIDTH` columns.

use bitflags::bitflags;
use core_text::egc_width;
use unicode_segmentation::UnicodeSegmentation;

pub mod layout;
pub mod render_engine;
pub mod status;
pub mod theme;
pub mod toolbar;
pub mod writer;

pub use render_engine::RenderEngine;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SpanFlags: u8 {
        const SELECTED = 0b0000_0001; // find selection highlight
        const EMPHASIS = 0b0000_0010; // bold toolbar labels
        const ERROR    = 0b0000_0100; // error status message
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub flags: SpanFlags,
}

impl Span {
    pub fn plain<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            flags: SpanFlags::empty(),
        }
    }

    pub fn styled<S: Into<String>>(text: S, flags: SpanFlags) -> Self {
        Self {
            text: text.into(),
            flags,
        }
    }
}

/// Which palette pair a row is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Chrome,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub kind: RowKind,
    pub spans: Vec<Span>,
}

impl Row {
    pub fn new(kind: RowKind) -> Self {
        Self {
            kind,
            spans: Vec::new(),
        }
    }

    /// Append text, merging with the previous span when flags match.
    pub fn push(&mut self, text: &str, flags: SpanFlags) {
        if text.is_empty() {
            return;
        }
        match self.spans.last_mut() {
            Some(last) if last.flags == flags => last.text.push_str(text),
            _ => self.spans.push(Span::styled(text, flags)),
        }
    }

    /// Concatenated text of all spans (styling dropped).
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    pub rows: Vec<Row>,
    /// Terminal cursor position; `None` hides the cursor.
    pub cursor: Option<(u16, u16)>,
}

/// Rows available to the text area for a terminal `height`.
pub fn text_rows(height: u16) -> usize {
    height.saturating_sub(2) as usize
}

/// Clip `s` to at most `width` columns without splitting a grapheme cluster.
pub fn clip_to_width(s: &str, width: usize) -> &str {
    let mut used = 0usize;
    for (idx, g) in s.grapheme_indices(true) {
        let w = egc_width(g) as usize;
        if used + w > width {
            return &s[..idx];
        }
        used += w;
    }
    s
}
