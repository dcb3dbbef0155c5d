//! Dispatcher applying `Action` to the editor model.
//!
//! Sub-modules:
//! * `edit`   - insert / backspace / delete, each one fresh edit
//! * `motion` - cursor movement (grapheme-aware horizontally)
//! * `undo`   - undo / redo over the snapshot stacks
//! * `prompt` - find / upload prompt editing and submission
//! * `toggle` - theme, auto-save, font size and alignment controls
//!
//! The dispatcher never performs blocking or async work itself except the
//! synchronous export on `Save`. Reading an upload is returned to the runtime
//! as an [`Effect`] so the read happens off the event loop.

use crate::Action;
use crate::io_ops;
use core_model::EditorModel;
use core_text::SearchMode;
use std::path::{Path, PathBuf};

mod edit;
mod motion;
mod prompt;
mod toggle;
mod undo;

/// Inputs the dispatcher needs that do not live on the model.
#[derive(Debug, Clone, Copy)]
pub struct DispatchContext<'a> {
    pub search_mode: SearchMode,
    pub export_dir: &'a Path,
    /// Visible text rows, used as the PageUp / PageDown step.
    pub page_rows: usize,
}

/// Work the runtime must carry out on the dispatcher's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ReadFile(PathBuf),
}

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DispatchResult {
    pub dirty: bool,
    /// The document text changed (a fresh edit, undo or redo). The runtime
    /// re-arms the auto-save deadline on this.
    pub text_changed: bool,
    pub autosave_toggled: bool,
    pub quit: bool,
    pub effect: Option<Effect>,
}

impl DispatchResult {
    pub fn clean() -> Self {
        Self::default()
    }
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            ..Self::default()
        }
    }
    pub fn text_changed() -> Self {
        Self {
            dirty: true,
            text_changed: true,
            ..Self::default()
        }
    }
    pub fn quit() -> Self {
        Self {
            dirty: true,
            quit: true,
            ..Self::default()
        }
    }
    pub fn effect(effect: Effect) -> Self {
        Self {
            dirty: true,
            effect: Some(effect),
            ..Self::default()
        }
    }
}

/// Apply an action to the model. Returns a `DispatchResult` describing
/// whether a render is needed, whether the text changed, and any effect.
pub fn dispatch(action: Action, model: &mut EditorModel, ctx: &DispatchContext<'_>) -> DispatchResult {
    let result = match action {
        Action::Edit(kind) => edit::handle_edit(kind, model),
        Action::Motion(kind) => motion::handle_motion(kind, model, ctx.page_rows),
        Action::ClearSelection => {
            if model.view.selection.take().is_some() {
                DispatchResult::dirty()
            } else {
                DispatchResult::clean()
            }
        }
        Action::Undo => undo::handle_undo(model),
        Action::Redo => undo::handle_redo(model),
        Action::Save => handle_save(model, ctx.export_dir),
        Action::PromptStart(_)
        | Action::PromptInsert(_)
        | Action::PromptBackspace
        | Action::PromptSubmit
        | Action::PromptCancel => prompt::handle_prompt_action(action, model, ctx.search_mode),
        Action::ToggleTheme
        | Action::ToggleAutosave
        | Action::FontSmaller
        | Action::FontLarger
        | Action::Align(_) => toggle::handle_toggle(action, model),
        Action::Quit => {
            tracing::info!(target: "actions.dispatch", "quit_requested");
            DispatchResult::quit()
        }
    };
    model.clamp_cursor();
    result
}

fn handle_save(model: &mut EditorModel, export_dir: &Path) -> DispatchResult {
    match io_ops::export_text(export_dir, model.text.text()) {
        Ok(path) => {
            model.view.last_saved = io_ops::timestamp_now();
            model.view.info(format!("Saved to {}", path.display()));
        }
        Err(e) => {
            tracing::error!(target: "io", error = %format!("{e:#}"), "export_failed");
            model.view.error(format!("Save failed: {e:#}"));
        }
    }
    DispatchResult::dirty()
}
