use tracing::trace;

/// Linear snapshot history backing undo/redo.
///
/// Every entry is a full copy of the document text. There is no cap and no
/// compaction: a session keeps every snapshot it ever pushed until the stacks
/// are popped or the redo side is invalidated by a fresh edit.
#[derive(Debug, Default, Clone)]
pub struct UndoEngine {
    undo_stack: Vec<String>,
    redo_stack: Vec<String>,
}

impl UndoEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
    pub fn undo_stack(&self) -> &[String] {
        &self.undo_stack
    }
    pub fn redo_stack(&self) -> &[String] {
        &self.redo_stack
    }

    /// Record `previous` as the most recent undo entry and invalidate redo history.
    pub fn push_fresh_edit(&mut self, previous: String) {
        let bytes = previous.len();
        self.undo_stack.push(previous);
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), bytes, "push_snapshot");
        if !self.redo_stack.is_empty() {
            self.redo_stack.clear();
            trace!(target: "state.undo", "redo_stack_cleared_on_new_edit");
        }
    }

    /// Swap `current` with the most recent undo entry. Returns false when there is
    /// nothing to undo; `current` is left untouched in that case.
    pub fn undo(&mut self, current: &mut String) -> bool {
        let Some(previous) = self.undo_stack.pop() else {
            return false;
        };
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "undo_pop");
        let superseded = std::mem::replace(current, previous);
        self.redo_stack.push(superseded);
        trace!(target: "state.undo", redo_depth = self.redo_stack.len(), "redo_push_from_undo");
        true
    }

    pub fn redo(&mut self, current: &mut String) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        trace!(target: "state.undo", redo_depth = self.redo_stack.len(), undo_depth = self.undo_stack.len(), "redo_pop");
        let superseded = std::mem::replace(current, next);
        self.undo_stack.push(superseded);
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), "undo_push_from_redo");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_on_empty_history_is_disabled() {
        let mut engine = UndoEngine::new();
        let mut current = String::from("keep");
        assert!(!engine.undo(&mut current));
        assert!(!engine.redo(&mut current));
        assert_eq!(current, "keep");
    }

    #[test]
    fn undo_then_redo_swaps_snapshots() {
        let mut engine = UndoEngine::new();
        let mut current = String::from("b");
        engine.push_fresh_edit("a".into());
        assert!(engine.undo(&mut current));
        assert_eq!(current, "a");
        assert_eq!(engine.redo_stack(), &["b".to_string()]);
        assert!(engine.redo(&mut current));
        assert_eq!(current, "b");
        assert_eq!(engine.undo_stack(), &["a".to_string()]);
        assert_eq!(engine.redo_depth(), 0);
    }

    #[test]
    fn fresh_edit_drops_redo_history() {
        let mut engine = UndoEngine::new();
        let mut current = String::from("one");
        engine.push_fresh_edit(String::new());
        engine.undo(&mut current);
        assert_eq!(engine.redo_depth(), 1);
        engine.push_fresh_edit(current.clone());
        assert_eq!(engine.redo_depth(), 0);
        assert_eq!(engine.undo_depth(), 1);
    }
}
