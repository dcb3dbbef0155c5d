//! Toolbar composition.
//!
//! Same two-stage pipeline as the footer: `compose_toolbar` yields ordered
//! segments, `toolbar_row` renders them into a styled row. Labels are drawn
//! with `EMPHASIS`, values plain, segments separated by ` | `.

use crate::{Row, RowKind, SpanFlags};
use core_config::{Alignment, FontSize, Theme};

pub const APP_TITLE: &str = "oxpad";

pub struct ToolbarContext<'a> {
    pub theme: Theme,
    pub autosave: bool,
    pub font_size: FontSize,
    pub alignment: Alignment,
    pub search_query: &'a str,
    pub can_undo: bool,
    pub can_redo: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolbarSegment<'a> {
    Title,
    Theme(Theme),
    Autosave(bool),
    FontSize(FontSize),
    Alignment(Alignment),
    /// Omitted while the query is empty.
    Search(&'a str),
    History { undo: bool, redo: bool },
}

pub fn compose_toolbar<'a>(ctx: &ToolbarContext<'a>) -> Vec<ToolbarSegment<'a>> {
    let mut out = Vec::with_capacity(7);
    out.push(ToolbarSegment::Title);
    out.push(ToolbarSegment::Theme(ctx.theme));
    out.push(ToolbarSegment::Autosave(ctx.autosave));
    out.push(ToolbarSegment::FontSize(ctx.font_size));
    out.push(ToolbarSegment::Alignment(ctx.alignment));
    if !ctx.search_query.is_empty() {
        out.push(ToolbarSegment::Search(ctx.search_query));
    }
    out.push(ToolbarSegment::History {
        undo: ctx.can_undo,
        redo: ctx.can_redo,
    });
    out
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

pub fn toolbar_row(segments: &[ToolbarSegment<'_>]) -> Row {
    let mut row = Row::new(RowKind::Chrome);
    let label = SpanFlags::EMPHASIS;
    let plain = SpanFlags::empty();
    for (i, seg) in segments.iter().enumerate() {
        if i > 0 {
            row.push(" | ", plain);
        }
        match seg {
            ToolbarSegment::Title => row.push(APP_TITLE, label),
            ToolbarSegment::Theme(t) => {
                row.push("Theme: ", label);
                row.push(t.as_str(), plain);
            }
            ToolbarSegment::Autosave(on) => {
                row.push("Auto-save: ", label);
                row.push(on_off(*on), plain);
            }
            ToolbarSegment::FontSize(size) => {
                row.push("Font: ", label);
                row.push(&size.to_string(), plain);
            }
            ToolbarSegment::Alignment(a) => {
                row.push("Align: ", label);
                row.push(a.as_str(), plain);
            }
            ToolbarSegment::Search(q) => {
                row.push("Find: ", label);
                row.push(&format!("\"{q}\""), plain);
            }
            ToolbarSegment::History { undo, redo } => {
                row.push("Undo: ", label);
                row.push(on_off(*undo), plain);
                row.push(" Redo: ", label);
                row.push(on_off(*redo), plain);
            }
        }
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ctx(query: &str) -> ToolbarContext<'_> {
        ToolbarContext {
            theme: Theme::Dark,
            autosave: true,
            font_size: FontSize::DEFAULT,
            alignment: Alignment::Center,
            search_query: query,
            can_undo: true,
            can_redo: false,
        }
    }

    #[test]
    fn toolbar_text_without_query() {
        let row = toolbar_row(&compose_toolbar(&ctx("")));
        assert_eq!(
            row.text(),
            "oxpad | Theme: dark | Auto-save: on | Font: 16px | Align: center | Undo: on Redo: off"
        );
    }

    #[test]
    fn query_segment_present_when_set() {
        let segs = compose_toolbar(&ctx("fox"));
        assert!(segs.contains(&ToolbarSegment::Search("fox")));
        assert!(toolbar_row(&segs).text().contains("Find: \"fox\""));
    }

    #[test]
    fn labels_are_emphasized() {
        let row = toolbar_row(&compose_toolbar(&ctx("")));
        assert_eq!(row.spans[0].flags, SpanFlags::EMPHASIS);
        assert_eq!(row.spans[0].text, "oxpad");
    }
}
