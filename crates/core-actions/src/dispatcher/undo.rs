//! Undo / redo over the full-text snapshot stacks in `TextState`.
//!
//! An empty stack makes the action a silent no-op. After a successful step
//! the cursor moves to the end of the restored text.

use super::DispatchResult;
use core_model::EditorModel;

pub(crate) fn handle_undo(model: &mut EditorModel) -> DispatchResult {
    if model.text.undo() {
        model.after_history_move();
        tracing::trace!(target: "actions.dispatch", op = "undo", undo_depth = model.text.undo_depth(), "history");
        DispatchResult::text_changed()
    } else {
        DispatchResult::clean()
    }
}

pub(crate) fn handle_redo(model: &mut EditorModel) -> DispatchResult {
    if model.text.redo() {
        model.after_history_move();
        tracing::trace!(target: "actions.dispatch", op = "redo", redo_depth = model.text.redo_depth(), "history");
        DispatchResult::text_changed()
    } else {
        DispatchResult::clean()
    }
}
