//! Text area layout.
//!
//! Each document line is broken into glyphs (one grapheme cluster each, tabs
//! expanded to spaces) carrying the char offset they start at. Lines that fit
//! the area are placed according to the alignment; a line wider than the area
//! starts at column 0. When the cursor sits past the right edge the whole
//! area scrolls horizontally so the cursor column stays visible.

use crate::{Row, RowKind, SpanFlags};
use core_config::Alignment;
use core_model::Selection;
use core_text::egc_width;
use unicode_segmentation::UnicodeSegmentation;

pub const TAB_WIDTH: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    /// Printable text (a tab becomes spaces).
    pub text: String,
    /// Document char offset of the cluster.
    pub char_start: usize,
    pub width: usize,
}

/// Lay out one document line starting at document char offset `line_start`.
pub fn layout_line(line: &str, line_start: usize) -> Vec<Glyph> {
    let mut out = Vec::new();
    let mut col = 0usize;
    let mut offset = line_start;
    for g in line.graphemes(true) {
        let (text, width) = if g == "\t" {
            let w = TAB_WIDTH - (col % TAB_WIDTH);
            (" ".repeat(w), w)
        } else {
            (g.to_string(), egc_width(g) as usize)
        };
        out.push(Glyph {
            text,
            char_start: offset,
            width,
        });
        col += width;
        offset += g.chars().count();
    }
    out
}

pub fn line_width(glyphs: &[Glyph]) -> usize {
    glyphs.iter().map(|g| g.width).sum()
}

/// Leading columns before a line of `line_width` in an area `area_width` wide.
pub fn align_offset(line_width: usize, area_width: usize, alignment: Alignment) -> usize {
    let free = area_width.saturating_sub(line_width);
    match alignment {
        Alignment::Left => 0,
        Alignment::Center => free / 2,
        Alignment::Right => free,
    }
}

/// Unscrolled column of `cursor` on a line (its glyphs, aligned).
pub fn cursor_column(glyphs: &[Glyph], cursor: usize, offset: usize) -> usize {
    offset
        + glyphs
            .iter()
            .take_while(|g| g.char_start < cursor)
            .map(|g| g.width)
            .sum::<usize>()
}

/// Horizontal scroll needed to keep column `cursor_col` visible.
pub fn horizontal_scroll(cursor_col: usize, area_width: usize) -> usize {
    if area_width == 0 {
        return 0;
    }
    (cursor_col + 1).saturating_sub(area_width)
}

/// Build the visible row for a line. Glyphs that straddle either edge of the
/// visible window are dropped rather than split.
pub fn text_row(
    glyphs: &[Glyph],
    offset: usize,
    h_scroll: usize,
    area_width: usize,
    selection: Option<Selection>,
) -> Row {
    let mut row = Row::new(RowKind::Text);
    let right = h_scroll + area_width;
    let mut x = offset;
    let mut printed = 0usize;
    if offset > h_scroll {
        let pad = (offset - h_scroll).min(area_width);
        row.push(&" ".repeat(pad), SpanFlags::empty());
        printed = pad;
    }
    for g in glyphs {
        let start = x;
        x += g.width;
        if start < h_scroll {
            continue;
        }
        if x > right {
            break;
        }
        if start > h_scroll + printed {
            // Fill the gap left by a dropped wide cluster at the left edge.
            let gap = start - h_scroll - printed;
            row.push(&" ".repeat(gap), SpanFlags::empty());
            printed += gap;
        }
        let flags = match selection {
            Some(sel) if sel.contains(g.char_start) => SpanFlags::SELECTED,
            _ => SpanFlags::empty(),
        };
        row.push(&g.text, flags);
        printed += g.width;
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tabs_expand_to_stops() {
        let glyphs = layout_line("a\tb", 0);
        assert_eq!(glyphs[1].text, "   ");
        assert_eq!(glyphs[2].char_start, 2);
        assert_eq!(line_width(&glyphs), 5);
    }

    #[test]
    fn alignment_offsets() {
        assert_eq!(align_offset(4, 10, Alignment::Left), 0);
        assert_eq!(align_offset(4, 10, Alignment::Center), 3);
        assert_eq!(align_offset(4, 10, Alignment::Right), 6);
        assert_eq!(align_offset(40, 10, Alignment::Right), 0);
    }

    #[test]
    fn centered_row_with_selection() {
        let glyphs = layout_line("fox", 10);
        let offset = align_offset(line_width(&glyphs), 7, Alignment::Center);
        let row = text_row(&glyphs, offset, 0, 7, Selection::new(11, 13));
        assert_eq!(row.text(), "  fox");
        assert_eq!(row.spans.len(), 2);
        assert_eq!(row.spans[1].text, "ox");
        assert_eq!(row.spans[1].flags, SpanFlags::SELECTED);
    }

    #[test]
    fn long_line_clips_and_scrolls() {
        let glyphs = layout_line("abcdefghij", 0);
        assert_eq!(text_row(&glyphs, 0, 0, 4, None).text(), "abcd");
        let col = cursor_column(&glyphs, 9, 0);
        assert_eq!(col, 9);
        let hs = horizontal_scroll(col, 4);
        assert_eq!(hs, 6);
        assert_eq!(text_row(&glyphs, 0, hs, 4, None).text(), "ghij");
    }

    #[test]
    fn wide_cluster_at_edge_is_not_split() {
        let glyphs = layout_line("ab世", 0);
        assert_eq!(text_row(&glyphs, 0, 0, 3, None).text(), "ab");
    }
}
