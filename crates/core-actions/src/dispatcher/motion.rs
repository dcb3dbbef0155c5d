//! Cursor motion.
//!
//! Horizontal steps move by grapheme cluster. Vertical steps keep the char
//! column, clamped to the target line. With an active selection, Left/Right
//! collapse to the selection edge instead of stepping. Any motion drops the
//! selection.

use super::DispatchResult;
use crate::MotionKind;
use core_model::EditorModel;
use core_text::{LineCol, char_index, grapheme, line_col};

pub(crate) fn handle_motion(
    kind: MotionKind,
    model: &mut EditorModel,
    page_rows: usize,
) -> DispatchResult {
    let text = model.text.text();
    let before = model.view.cursor;
    let selection = model.view.selection.take();
    let pos = line_col(text, before);
    let last_line = model.text.line_count() - 1;
    let page = page_rows.max(1);

    let target = match kind {
        MotionKind::Left => match selection {
            Some(sel) => sel.start,
            None => grapheme::prev_boundary(text, before),
        },
        MotionKind::Right => match selection {
            Some(sel) => sel.end,
            None => grapheme::next_boundary(text, before),
        },
        MotionKind::Up if pos.line == 0 => 0,
        MotionKind::Up => char_index(text, LineCol::new(pos.line - 1, pos.col)),
        MotionKind::Down if pos.line == last_line => model.char_len(),
        MotionKind::Down => char_index(text, LineCol::new(pos.line + 1, pos.col)),
        MotionKind::LineStart => char_index(text, LineCol::new(pos.line, 0)),
        MotionKind::LineEnd => char_index(text, LineCol::new(pos.line, usize::MAX)),
        MotionKind::PageUp => {
            char_index(text, LineCol::new(pos.line.saturating_sub(page), pos.col))
        }
        MotionKind::PageDown => {
            let line = (pos.line + page).min(last_line);
            char_index(text, LineCol::new(line, pos.col))
        }
    };

    model.view.cursor = target;
    tracing::trace!(target: "actions.dispatch", ?kind, from = before, to = target, "motion");
    if target != before || selection.is_some() {
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}
