#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_actions::{Action, DispatchContext, DispatchResult, dispatch, translate_key};
use core_events::{KeyCode, KeyEvent};
use core_model::EditorModel;
use core_text::SearchMode;
use std::path::Path;

pub fn ctx(export_dir: &Path) -> DispatchContext<'_> {
    DispatchContext {
        search_mode: SearchMode::Literal,
        export_dir,
        page_rows: 20,
    }
}

/// Translate and dispatch one key the way the runtime does.
pub fn press(model: &mut EditorModel, key: KeyEvent) -> Option<DispatchResult> {
    let action = translate_key(model.view.prompt_active(), &key)?;
    Some(dispatch(action, model, &ctx(Path::new("."))))
}

pub fn type_str(model: &mut EditorModel, s: &str) {
    for c in s.chars() {
        press(model, KeyEvent::plain(KeyCode::Char(c)));
    }
}

pub fn run(model: &mut EditorModel, action: Action, export_dir: &Path) -> DispatchResult {
    dispatch(action, model, &ctx(export_dir))
}
