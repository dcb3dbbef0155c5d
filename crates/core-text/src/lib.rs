//! Text helpers shared by the controller and the renderer.
//!
//! The document is a plain `String`; every offset exchanged between crates is
//! a *char offset* (index of a Unicode scalar value) so that counts, cursor
//! positions and search selections use the same unit. Byte offsets only appear
//! at the boundary with `str` slicing and the regex engine.

pub mod search;
pub mod segment;
pub mod width;

pub use search::{SearchError, SearchMode, find};
pub use width::{display_width, egc_width};

/// Cursor location expressed as (line index, char column within that line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineCol {
    pub line: usize,
    pub col: usize,
}

impl LineCol {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// Byte index of the `char_idx`-th char; clamps to `text.len()`.
pub fn char_to_byte(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(b, _)| b)
        .unwrap_or(text.len())
}

/// Char offset of a byte index (which must lie on a char boundary).
pub fn byte_to_char(text: &str, byte: usize) -> usize {
    let byte = byte.min(text.len());
    text[..byte].chars().count()
}

/// Line/column of a char offset. Offsets past the end clamp to the end.
pub fn line_col(text: &str, char_idx: usize) -> LineCol {
    let mut pos = LineCol::default();
    for (i, c) in text.chars().enumerate() {
        if i == char_idx {
            break;
        }
        if c == '\n' {
            pos.line += 1;
            pos.col = 0;
        } else {
            pos.col += 1;
        }
    }
    pos
}

/// Char offset for a (line, col) pair. Columns past the end of a line clamp to
/// that line's end; lines past the end clamp to the document end.
pub fn char_index(text: &str, target: LineCol) -> usize {
    let mut offset = 0usize;
    let mut line = 0usize;
    let mut col = 0usize;
    for c in text.chars() {
        if line == target.line && (col == target.col || c == '\n') {
            return offset;
        }
        if c == '\n' {
            line += 1;
            col = 0;
        } else {
            col += 1;
        }
        offset += 1;
    }
    offset
}

/// Lines of `text` split on '\n' (the empty document yields one empty line).
pub fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
}

/// Grapheme-aware cursor stepping over whole-document char offsets.
pub mod grapheme {
    use unicode_segmentation::UnicodeSegmentation;

    /// Previous grapheme boundary before `char_idx` (0 when already at start).
    pub fn prev_boundary(text: &str, char_idx: usize) -> usize {
        let byte = crate::char_to_byte(text, char_idx);
        if byte == 0 {
            return 0;
        }
        let mut last = 0;
        for (idx, _) in text.grapheme_indices(true) {
            if idx >= byte {
                break;
            }
            last = idx;
        }
        crate::byte_to_char(text, last)
    }

    /// Next grapheme boundary after `char_idx` (the char length when at end).
    pub fn next_boundary(text: &str, char_idx: usize) -> usize {
        let byte = crate::char_to_byte(text, char_idx);
        if byte >= text.len() {
            return text.chars().count();
        }
        for (idx, _) in text.grapheme_indices(true) {
            if idx > byte {
                return crate::byte_to_char(text, idx);
            }
        }
        text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_byte_conversions() {
        let s = "aé😀b";
        assert_eq!(char_to_byte(s, 0), 0);
        assert_eq!(char_to_byte(s, 2), 3);
        assert_eq!(char_to_byte(s, 3), 7);
        assert_eq!(char_to_byte(s, 99), s.len());
        assert_eq!(byte_to_char(s, 7), 3);
    }

    #[test]
    fn line_col_round_trip_points() {
        let s = "ab\ncde\n\nf";
        assert_eq!(line_col(s, 0), LineCol::new(0, 0));
        assert_eq!(line_col(s, 2), LineCol::new(0, 2));
        assert_eq!(line_col(s, 3), LineCol::new(1, 0));
        assert_eq!(line_col(s, 7), LineCol::new(2, 0));
        assert_eq!(line_col(s, 9), LineCol::new(3, 1));
        assert_eq!(char_index(s, LineCol::new(1, 2)), 5);
        assert_eq!(char_index(s, LineCol::new(0, 10)), 2);
        assert_eq!(char_index(s, LineCol::new(2, 4)), 7);
        assert_eq!(char_index(s, LineCol::new(9, 0)), 9);
    }

    #[test]
    fn grapheme_boundaries_skip_combining_marks() {
        let s = "ae\u{0301}b";
        assert_eq!(grapheme::next_boundary(s, 1), 3);
        assert_eq!(grapheme::prev_boundary(s, 3), 1);
        assert_eq!(grapheme::prev_boundary(s, 0), 0);
        assert_eq!(grapheme::next_boundary(s, 4), 4);
    }

    #[test]
    fn empty_document_has_one_line() {
        assert_eq!(lines("").count(), 1);
        assert_eq!(lines("a\n").count(), 2);
    }
}
