//! Editing session: the model plus its persistence wiring.
//!
//! Owns everything the event loop mutates that is not terminal plumbing: the
//! `EditorModel`, the key/value store, and the auto-save timer. All methods
//! take the current `Instant` from the caller so the auto-save schedule can be
//! driven deterministically in tests.

use core_actions::io_ops;
use core_actions::{Action, DispatchContext, DispatchResult, dispatch};
use core_config::Config;
use core_events::FileLoad;
use core_model::{EditorModel, ViewState};
use core_storage::{AutoSaveTimer, EDITOR_CONTENT_KEY, KeyValueStore};
use core_text::SearchMode;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

pub struct Session<S: KeyValueStore> {
    pub model: EditorModel,
    store: S,
    autosave: AutoSaveTimer,
    search_mode: SearchMode,
    export_dir: PathBuf,
    flush_on_exit: bool,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(config: &Config, store: S, export_dir: PathBuf) -> Self {
        Self {
            model: EditorModel::new(ViewState::from_config(config)),
            store,
            autosave: AutoSaveTimer::new(config.autosave().delay()),
            search_mode: config.search_mode(),
            export_dir,
            flush_on_exit: config.autosave().flush_on_exit,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn autosave_deadline(&self) -> Option<Instant> {
        self.autosave.deadline()
    }

    /// Seed the document from storage. A stored non-empty value becomes a
    /// fresh edit; absence or a read failure leaves the empty document.
    pub fn restore(&mut self, now: Instant) -> bool {
        match self.store.get(EDITOR_CONTENT_KEY) {
            Ok(Some(text)) if !text.is_empty() => {
                info!(target: "storage", bytes = text.len(), "restored");
                self.model.replace_all(text);
                self.rearm(now);
                true
            }
            Ok(_) => {
                info!(target: "storage", "nothing_to_restore");
                false
            }
            Err(e) => {
                warn!(target: "storage", error = %e, "restore_failed");
                self.model.view.error(format!("Could not read saved text: {e}"));
                false
            }
        }
    }

    pub fn dispatch(&mut self, action: Action, page_rows: usize, now: Instant) -> DispatchResult {
        let ctx = DispatchContext {
            search_mode: self.search_mode,
            export_dir: &self.export_dir,
            page_rows,
        };
        let result = dispatch(action, &mut self.model, &ctx);
        if result.text_changed || result.autosave_toggled {
            self.rearm(now);
        }
        result
    }

    pub fn apply_file_load(&mut self, load: FileLoad, now: Instant) -> bool {
        let changed = io_ops::apply_file_load(&mut self.model, load);
        if changed {
            self.rearm(now);
        }
        changed
    }

    /// Periodic housekeeping. Returns true when the screen needs a redraw.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut dirty = self.model.view.tick_status(now);
        if self.autosave.poll(now) {
            self.save_to_store();
            dirty = true;
        }
        dirty
    }

    /// Write a still-pending auto-save before exit when configured to.
    pub fn finish(&mut self) {
        if self.autosave.take_pending() {
            if self.flush_on_exit {
                info!(target: "autosave", "flush_on_exit");
                self.save_to_store();
            } else {
                info!(target: "autosave", "pending_save_dropped");
            }
        }
    }

    fn rearm(&mut self, now: Instant) {
        let empty = self.model.text.text().is_empty();
        self.autosave.rearm(now, self.model.view.autosave, empty);
    }

    fn save_to_store(&mut self) {
        let text = self.model.text.text();
        match self.store.set(EDITOR_CONTENT_KEY, text) {
            Ok(()) => {
                info!(target: "storage", bytes = text.len(), "autosaved");
                self.model.view.last_saved = io_ops::timestamp_now();
            }
            Err(e) => {
                warn!(target: "storage", error = %e, "autosave_failed");
                self.model.view.error(format!("Auto-save failed: {e}"));
            }
        }
    }
}
