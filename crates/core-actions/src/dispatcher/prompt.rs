//! Find / upload prompt handling.
//!
//! The find prompt opens prefilled with the last query. Submitting stores the
//! query on the view and selects the first case-insensitive match as
//! `[offset, offset + query chars)`, clamped to the text. An empty query or a
//! miss leaves selection and cursor untouched. Submitting the upload prompt
//! emits `Effect::ReadFile`; an empty path closes the prompt with nothing
//! loaded.

use super::{DispatchResult, Effect};
use crate::Action;
use core_model::{EditorModel, Prompt, PromptKind, Selection};
use core_text::SearchMode;
use std::path::PathBuf;

pub(crate) fn handle_prompt_action(
    action: Action,
    model: &mut EditorModel,
    mode: SearchMode,
) -> DispatchResult {
    match action {
        Action::PromptStart(kind) => {
            let buffer = match kind {
                PromptKind::Find => model.view.search_query.clone(),
                PromptKind::Upload => String::new(),
            };
            model.view.prompt = Some(Prompt { kind, buffer });
            DispatchResult::dirty()
        }
        Action::PromptInsert(s) => match model.view.prompt.as_mut() {
            Some(p) => {
                p.buffer.push_str(&s);
                DispatchResult::dirty()
            }
            None => DispatchResult::clean(),
        },
        Action::PromptBackspace => match model.view.prompt.as_mut() {
            Some(p) => {
                p.buffer.pop();
                DispatchResult::dirty()
            }
            None => DispatchResult::clean(),
        },
        Action::PromptCancel => {
            if model.view.prompt.take().is_some() {
                DispatchResult::dirty()
            } else {
                DispatchResult::clean()
            }
        }
        Action::PromptSubmit => match model.view.prompt.take() {
            Some(Prompt {
                kind: PromptKind::Find,
                buffer,
            }) => {
                model.view.search_query = buffer;
                run_find(model, mode);
                DispatchResult::dirty()
            }
            Some(Prompt {
                kind: PromptKind::Upload,
                buffer,
            }) => {
                let trimmed = buffer.trim();
                if trimmed.is_empty() {
                    tracing::debug!(target: "io", "upload_cancelled_empty_path");
                    return DispatchResult::dirty();
                }
                DispatchResult::effect(Effect::ReadFile(PathBuf::from(trimmed)))
            }
            None => DispatchResult::clean(),
        },
        _ => DispatchResult::clean(),
    }
}

/// Select the first match of the stored query. Returns true on a match.
pub(crate) fn run_find(model: &mut EditorModel, mode: SearchMode) -> bool {
    let query = &model.view.search_query;
    match core_text::find(model.text.text(), query, mode) {
        Ok(Some(start)) => {
            let end = (start + query.chars().count()).min(model.char_len());
            let Some(sel) = Selection::new(start, end) else {
                return false;
            };
            model.view.selection = Some(sel);
            model.view.cursor = sel.end;
            true
        }
        Ok(None) => false,
        Err(e) => {
            tracing::warn!(target: "search", error = %e, "find_failed");
            model.view.error(e.to_string());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submit_find(model: &mut EditorModel, query: &str, mode: SearchMode) {
        handle_prompt_action(Action::PromptStart(PromptKind::Find), model, mode);
        if let Some(p) = model.view.prompt.as_mut() {
            p.buffer = query.to_string();
        }
        handle_prompt_action(Action::PromptSubmit, model, mode);
    }

    #[test]
    fn find_selects_case_insensitive_match() {
        let mut m = EditorModel::default();
        m.replace_all("The Quick Fox".into());
        submit_find(&mut m, "quick", SearchMode::Literal);
        assert_eq!(m.view.selection, Selection::new(4, 9));
        assert_eq!(m.view.cursor, 9);
        assert_eq!(m.view.search_query, "quick");
        assert!(m.view.prompt.is_none());
    }

    #[test]
    fn empty_query_and_miss_leave_cursor() {
        let mut m = EditorModel::default();
        m.replace_all("abc".into());
        m.view.cursor = 1;
        submit_find(&mut m, "", SearchMode::Literal);
        assert_eq!(m.view.cursor, 1);
        assert!(m.view.selection.is_none());
        submit_find(&mut m, "zzz", SearchMode::Literal);
        assert_eq!(m.view.cursor, 1);
        assert!(m.view.selection.is_none());
    }

    #[test]
    fn find_prompt_is_prefilled() {
        let mut m = EditorModel::default();
        m.view.search_query = "prev".into();
        handle_prompt_action(Action::PromptStart(PromptKind::Find), &mut m, SearchMode::Literal);
        assert_eq!(m.view.prompt.as_ref().map(|p| p.buffer.as_str()), Some("prev"));
    }

    #[test]
    fn invalid_regex_reports_status() {
        let mut m = EditorModel::default();
        m.replace_all("a(b".into());
        submit_find(&mut m, "(", SearchMode::Regex);
        assert!(m.view.selection.is_none());
        assert!(m.view.status.is_some());
        submit_find(&mut m, "(", SearchMode::Literal);
        assert_eq!(m.view.selection, Selection::new(1, 2));
    }

    #[test]
    fn upload_submit_emits_read_effect() {
        let mut m = EditorModel::default();
        let mode = SearchMode::Literal;
        handle_prompt_action(Action::PromptStart(PromptKind::Upload), &mut m, mode);
        handle_prompt_action(Action::PromptInsert(" notes.txt ".into()), &mut m, mode);
        let r = handle_prompt_action(Action::PromptSubmit, &mut m, mode);
        assert_eq!(r.effect, Some(Effect::ReadFile(PathBuf::from("notes.txt"))));
    }

    #[test]
    fn upload_with_empty_path_loads_nothing() {
        let mut m = EditorModel::default();
        let mode = SearchMode::Literal;
        handle_prompt_action(Action::PromptStart(PromptKind::Upload), &mut m, mode);
        let r = handle_prompt_action(Action::PromptSubmit, &mut m, mode);
        assert!(r.effect.is_none());
        assert!(m.view.prompt.is_none());
    }
}
