//! File import / export helpers.
//!
//! Export (download) is synchronous and writes the document verbatim to a
//! fixed file name. Import (upload) is async: the runtime spawns
//! [`read_upload`] and feeds the resulting [`FileLoad`] back through the event
//! channel, where [`apply_file_load`] turns it into one fresh edit.

use anyhow::{Context, Result};
use core_events::{FileLoad, FileLoadError};
use core_model::EditorModel;
use core_state::normalize_line_endings;
use std::path::{Path, PathBuf};

/// Name of the exported document.
pub const EXPORT_FILE_NAME: &str = "edited-file.txt";

/// Write `text` to `<dir>/edited-file.txt`, replacing any existing file.
pub fn export_text(dir: &Path, text: &str) -> Result<PathBuf> {
    let path = dir.join(EXPORT_FILE_NAME);
    std::fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(target: "io", path = %path.display(), bytes = text.len(), "export_written");
    Ok(path)
}

/// Read an uploaded file. Invalid UTF-8 is replaced rather than rejected;
/// CRLF / CR endings fold to LF.
pub async fn read_upload(path: PathBuf) -> FileLoad {
    let result = match tokio::fs::read(&path).await {
        Ok(bytes) => {
            let decoded = String::from_utf8_lossy(&bytes);
            let text = normalize_line_endings(&decoded).into_owned();
            tracing::info!(target: "io", path = %path.display(), bytes = bytes.len(), "upload_read");
            Ok(text)
        }
        Err(e) => {
            tracing::error!(target: "io", path = %path.display(), error = %e, "upload_read_failed");
            Err(FileLoadError::from(e))
        }
    };
    FileLoad { path, result }
}

/// Apply a finished read to the model. Returns true when the text changed.
/// A failed read leaves text and history untouched and reports the error.
pub fn apply_file_load(model: &mut EditorModel, load: FileLoad) -> bool {
    let name = load
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| load.path.display().to_string());
    match load.result {
        Ok(text) => {
            model.replace_all(text);
            model.view.info(format!("Loaded {name}"));
            true
        }
        Err(e) => {
            model.view.error(format!("Could not read {name}: {e}"));
            false
        }
    }
}

/// Wall-clock time shown as "last saved".
pub fn timestamp_now() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}
