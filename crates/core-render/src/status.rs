//! Footer composition.
//!
//! Format: `Characters: N | Words: N | Lines: N | Last saved: T` followed by
//! the status message, if any, after two spaces. While a prompt is active the
//! footer row shows `<Label>: <buffer>` instead.
//!
//! Two stages, mirroring the toolbar:
//! 1. `compose_footer` produces ordered `FooterSegment`s.
//! 2. `footer_row` renders them into a styled `Row`.

use crate::{Row, RowKind, SpanFlags};
use core_model::{Prompt, StatusLevel};
use core_state::Counts;

pub struct FooterContext<'a> {
    pub counts: Counts,
    pub last_saved: &'a str,
    pub message: Option<(&'a str, StatusLevel)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FooterSegment<'a> {
    Characters(usize),
    Words(usize),
    Lines(usize),
    LastSaved(&'a str),
    Message(&'a str, StatusLevel),
}

pub fn compose_footer<'a>(ctx: &FooterContext<'a>) -> Vec<FooterSegment<'a>> {
    let mut out = vec![
        FooterSegment::Characters(ctx.counts.characters),
        FooterSegment::Words(ctx.counts.words),
        FooterSegment::Lines(ctx.counts.lines),
        FooterSegment::LastSaved(ctx.last_saved),
    ];
    if let Some((text, level)) = ctx.message {
        out.push(FooterSegment::Message(text, level));
    }
    out
}

pub fn footer_row(segments: &[FooterSegment<'_>]) -> Row {
    let mut row = Row::new(RowKind::Chrome);
    let plain = SpanFlags::empty();
    for (i, seg) in segments.iter().enumerate() {
        let text = match seg {
            FooterSegment::Characters(n) => format!("Characters: {n}"),
            FooterSegment::Words(n) => format!("Words: {n}"),
            FooterSegment::Lines(n) => format!("Lines: {n}"),
            FooterSegment::LastSaved(t) => format!("Last saved: {t}"),
            FooterSegment::Message(text, level) => {
                let flags = match level {
                    StatusLevel::Error => SpanFlags::ERROR,
                    StatusLevel::Info => SpanFlags::EMPHASIS,
                };
                row.push("  ", plain);
                row.push(text, flags);
                continue;
            }
        };
        if i > 0 {
            row.push(" | ", plain);
        }
        row.push(&text, plain);
    }
    row
}

/// Prompt line text; the caret sits at its display width.
pub fn prompt_text(prompt: &Prompt) -> String {
    format!("{}: {}", prompt.kind.label(), prompt.buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_model::PromptKind;
    use pretty_assertions::assert_eq;

    fn counts(characters: usize, words: usize, lines: usize) -> Counts {
        Counts {
            characters,
            words,
            lines,
        }
    }

    #[test]
    fn footer_without_message() {
        let ctx = FooterContext {
            counts: counts(0, 0, 1),
            last_saved: "Not saved yet",
            message: None,
        };
        assert_eq!(
            footer_row(&compose_footer(&ctx)).text(),
            "Characters: 0 | Words: 0 | Lines: 1 | Last saved: Not saved yet"
        );
    }

    #[test]
    fn error_message_is_flagged() {
        let ctx = FooterContext {
            counts: counts(11, 2, 2),
            last_saved: "10:15:00",
            message: Some(("Save failed", StatusLevel::Error)),
        };
        let row = footer_row(&compose_footer(&ctx));
        assert_eq!(
            row.text(),
            "Characters: 11 | Words: 2 | Lines: 2 | Last saved: 10:15:00  Save failed"
        );
        let last = row.spans.last().unwrap();
        assert_eq!(last.flags, SpanFlags::ERROR);
    }

    #[test]
    fn prompt_line_format() {
        let p = Prompt {
            kind: PromptKind::Find,
            buffer: "fox".into(),
        };
        assert_eq!(prompt_text(&p), "Find: fox");
    }
}
