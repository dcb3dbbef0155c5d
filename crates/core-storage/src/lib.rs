//! Local persistent key/value storage and the auto-save debounce timer.
//!
//! The editor persists exactly one value: the whole document under
//! [`EDITOR_CONTENT_KEY`]. Writes overwrite unconditionally (last write wins);
//! there is no versioning and no history.
//!
//! [`FileStore`] keeps every key in one JSON object file that is rewritten
//! wholesale on each `set` via a temp file + rename, so a crash mid-write
//! leaves the previous contents intact. [`MemoryStore`] backs tests.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

pub mod autosave;
pub use autosave::AutoSaveTimer;

/// Storage key holding the document text.
pub const EDITOR_CONTENT_KEY: &str = "editorContent";

pub const STORAGE_FILE_NAME: &str = "storage.json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("storage file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("no data directory available for storage")]
    NoDataDir,
}

/// Minimal string key/value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StorageFile {
    #[serde(flatten)]
    entries: BTreeMap<String, String>,
}

/// JSON-file backed store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<data_local_dir>/oxpad/storage.json`.
    pub fn at_default_location() -> Result<Self, StorageError> {
        let dir = dirs::data_local_dir().ok_or(StorageError::NoDataDir)?;
        Ok(Self::new(dir.join("oxpad").join(STORAGE_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_file(&self) -> Result<StorageFile, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                serde_json::from_str(&contents).map_err(|source| StorageError::Corrupt {
                    path: self.path.clone(),
                    source,
                })
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(StorageFile::default()),
            Err(e) => Err(self.io_err(e)),
        }
    }

    fn write_file(&self, file: &StorageFile) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }
        let contents = serde_json::to_string(file).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, contents).map_err(|e| self.io_err(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_err(e))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self.read_file()?.entries.remove(key);
        trace!(target: "storage", key, present = value.is_some(), "get");
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // A corrupt file is replaced rather than blocking every future save.
        let mut file = match self.read_file() {
            Ok(file) => file,
            Err(StorageError::Corrupt { .. }) => StorageFile::default(),
            Err(e) => return Err(e),
        };
        file.entries.insert(key.to_string(), value.to_string());
        self.write_file(&file)?;
        debug!(target: "storage", key, bytes = value.len(), path = %self.path.display(), "set");
        Ok(())
    }
}

/// In-memory store; `fail_writes` simulates an unavailable backend.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    pub writes: usize,
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Io {
                path: PathBuf::from("<memory>"),
                source: io::Error::new(io::ErrorKind::StorageFull, "quota exceeded"),
            });
        }
        self.writes += 1;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("storage.json"));
        assert_eq!(store.get(EDITOR_CONTENT_KEY).unwrap(), None);
    }

    #[test]
    fn set_then_get_and_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested").join("storage.json"));
        store.set(EDITOR_CONTENT_KEY, "first draft").unwrap();
        assert_eq!(
            store.get(EDITOR_CONTENT_KEY).unwrap().as_deref(),
            Some("first draft")
        );
        store.set(EDITOR_CONTENT_KEY, "second\ndraft").unwrap();
        let reopened = FileStore::new(store.path());
        assert_eq!(
            reopened.get(EDITOR_CONTENT_KEY).unwrap().as_deref(),
            Some("second\ndraft")
        );
    }

    #[test]
    fn other_keys_survive_a_set() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, r#"{"other":"kept"}"#).unwrap();
        let mut store = FileStore::new(&path);
        store.set(EDITOR_CONTENT_KEY, "doc").unwrap();
        assert_eq!(store.get("other").unwrap().as_deref(), Some("kept"));
    }

    #[test]
    fn corrupt_file_is_reported_on_read_and_replaced_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json").unwrap();
        let mut store = FileStore::new(&path);
        assert!(matches!(
            store.get(EDITOR_CONTENT_KEY),
            Err(StorageError::Corrupt { .. })
        ));
        store.set(EDITOR_CONTENT_KEY, "fresh").unwrap();
        assert_eq!(store.get(EDITOR_CONTENT_KEY).unwrap().as_deref(), Some("fresh"));
    }

    #[test]
    fn memory_store_failure_mode() {
        let mut store = MemoryStore::new();
        store.set("k", "v").unwrap();
        assert_eq!(store.writes, 1);
        store.fail_writes = true;
        let err = store.set("k", "w").unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
