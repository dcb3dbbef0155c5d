//! Editor actions: key translation, dispatch onto the model, and file I/O.
//!
//! Input flows `KeyEvent -> translate_key -> Action -> dispatch`. Every action
//! that changes the document turns into exactly one fresh edit on
//! `TextState` (the full new text is handed to `set_text`), so undo steps
//! line up one-to-one with keystrokes, pastes and uploads.

pub mod dispatcher;
pub mod io_ops;
mod key_translator;

pub use dispatcher::{DispatchContext, DispatchResult, Effect, dispatch};
pub use key_translator::{translate_key, translate_paste};

use core_config::Alignment;
use core_model::PromptKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Edit(EditKind),
    Motion(MotionKind),
    /// Drop the find selection without moving the cursor.
    ClearSelection,
    Undo,
    Redo,
    /// Download the document to the export directory.
    Save,
    PromptStart(PromptKind),
    PromptInsert(String),
    PromptBackspace,
    PromptSubmit,
    PromptCancel,
    ToggleTheme,
    ToggleAutosave,
    FontSmaller,
    FontLarger,
    Align(Alignment),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditKind {
    /// Insert text at the cursor, replacing the selection when one is active.
    Insert(String),
    Backspace,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    PageUp,
    PageDown,
}
