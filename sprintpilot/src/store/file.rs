//! File-backed stage store.
//!
//! Persists entries as a single JSON object keyed by store key, so outputs
//! survive process restarts until the operator clears them.

use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::StageStore;
use crate::core::{is_truthy, StageOutput, StoreKey};
use crate::errors::{Result, StoreError};

type Entries = serde_json::Map<String, serde_json::Value>;

/// A stage store persisted to a JSON file.
///
/// Every call reads or rewrites the file, so separate processes see each
/// other's writes. The lock only serializes access within this process.
#[derive(Debug)]
pub struct FileStageStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStageStore {
    /// Opens a store at `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn read_entries(&self) -> Result<Entries> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(self.io_error(e).into()),
        };
        if text.trim().is_empty() {
            return Ok(Entries::new());
        }

        match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(serde_json::Value::Object(entries)) => Ok(entries),
            Ok(_) => Err(StoreError::Corrupt {
                path: self.path.display().to_string(),
                reason: "expected a JSON object".to_string(),
            }
            .into()),
            Err(e) => Err(StoreError::Corrupt {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            }
            .into()),
        }
    }

    fn write_entries(&self, entries: &Entries) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let text = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, text).map_err(|e| self.io_error(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;
        Ok(())
    }
}

impl StageStore for FileStageStore {
    fn get(&self, key: StoreKey) -> Result<Option<StageOutput>> {
        let _guard = self.lock.lock();
        let mut entries = self.read_entries()?;
        Ok(entries.remove(key.as_str()).filter(is_truthy))
    }

    fn put(&self, key: StoreKey, value: StageOutput) -> Result<()> {
        let _guard = self.lock.lock();
        let mut entries = self.read_entries()?;
        entries.insert(key.as_str().to_string(), value);
        self.write_entries(&entries)?;
        debug!(key = %key, path = %self.path.display(), "Stage output persisted");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let _guard = self.lock.lock();
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e).into()),
        }
    }
}
