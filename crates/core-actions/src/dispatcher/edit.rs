//! Text edit handling (insert / backspace / delete).
//!
//! Each handler builds the complete new text and hands it to
//! `EditorModel::apply_edit`, which records one fresh edit. Deletions step
//! over whole grapheme clusters. An active selection is replaced by an insert
//! and removed by either delete key. Deleting at a document boundary is a
//! no-op and records nothing.

use super::DispatchResult;
use crate::EditKind;
use core_model::EditorModel;
use core_text::{char_to_byte, grapheme};

pub(crate) fn handle_edit(kind: EditKind, model: &mut EditorModel) -> DispatchResult {
    let cursor = model.view.cursor;
    let selection = model.view.selection.map(|s| (s.start, s.end));
    match kind {
        EditKind::Insert(s) => {
            if s.is_empty() {
                return DispatchResult::clean();
            }
            let (start, end) = selection.unwrap_or((cursor, cursor));
            splice(model, start, end, &s, "insert")
        }
        EditKind::Backspace => {
            let range = selection.or_else(|| {
                (cursor > 0).then(|| (grapheme::prev_boundary(model.text.text(), cursor), cursor))
            });
            match range {
                Some((start, end)) => splice(model, start, end, "", "backspace"),
                None => DispatchResult::clean(),
            }
        }
        EditKind::Delete => {
            let len = model.char_len();
            let range = selection.or_else(|| {
                (cursor < len).then(|| (cursor, grapheme::next_boundary(model.text.text(), cursor)))
            });
            match range {
                Some((start, end)) => splice(model, start, end, "", "delete"),
                None => DispatchResult::clean(),
            }
        }
    }
}

/// Replace chars `[start, end)` with `insert` as one fresh edit.
fn splice(
    model: &mut EditorModel,
    start: usize,
    end: usize,
    insert: &str,
    op: &'static str,
) -> DispatchResult {
    let text = model.text.text();
    let b0 = char_to_byte(text, start);
    let b1 = char_to_byte(text, end);
    let mut next = String::with_capacity(text.len() - (b1 - b0) + insert.len());
    next.push_str(&text[..b0]);
    next.push_str(insert);
    next.push_str(&text[b1..]);
    let cursor = start + insert.chars().count();
    tracing::trace!(
        target: "actions.dispatch",
        op,
        removed = end - start,
        inserted_bytes = insert.len(),
        cursor,
        "edit"
    );
    model.apply_edit(next, cursor);
    DispatchResult::text_changed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_model::Selection;

    fn model_with(text: &str, cursor: usize) -> EditorModel {
        let mut m = EditorModel::default();
        m.replace_all(text.to_string());
        m.view.cursor = cursor;
        m
    }

    #[test]
    fn insert_at_cursor() {
        let mut m = model_with("helo", 3);
        handle_edit(EditKind::Insert("l".into()), &mut m);
        assert_eq!(m.text.text(), "hello");
        assert_eq!(m.view.cursor, 4);
    }

    #[test]
    fn insert_replaces_selection() {
        let mut m = model_with("hello world", 0);
        m.view.selection = Selection::new(6, 11);
        handle_edit(EditKind::Insert("there".into()), &mut m);
        assert_eq!(m.text.text(), "hello there");
        assert_eq!(m.view.cursor, 11);
        assert!(m.view.selection.is_none());
        assert_eq!(m.text.undo_stack().last().map(String::as_str), Some("hello world"));
    }

    #[test]
    fn backspace_removes_whole_cluster() {
        let mut m = model_with("ae\u{301}", 3);
        handle_edit(EditKind::Backspace, &mut m);
        assert_eq!(m.text.text(), "a");
        assert_eq!(m.view.cursor, 1);
    }

    #[test]
    fn backspace_at_start_records_nothing() {
        let mut m = model_with("abc", 0);
        let depth = m.text.undo_depth();
        assert_eq!(handle_edit(EditKind::Backspace, &mut m), DispatchResult::clean());
        assert_eq!(m.text.undo_depth(), depth);
    }

    #[test]
    fn delete_forward_and_at_end() {
        let mut m = model_with("abc", 1);
        handle_edit(EditKind::Delete, &mut m);
        assert_eq!(m.text.text(), "ac");
        assert_eq!(m.view.cursor, 1);
        m.view.cursor = 2;
        assert!(!handle_edit(EditKind::Delete, &mut m).text_changed);
    }

    #[test]
    fn delete_removes_selection() {
        let mut m = model_with("abcdef", 6);
        m.view.selection = Selection::new(1, 4);
        handle_edit(EditKind::Delete, &mut m);
        assert_eq!(m.text.text(), "aef");
        assert_eq!(m.view.cursor, 1);
    }
}
