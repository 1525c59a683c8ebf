//! File-based session store adapter.
//!
//! Session keys are kept as one flat JSON object, by default in
//! `~/.secops/session.json`.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::traits::{SessionStore, SessionStoreError};

type Entries = BTreeMap<String, String>;

/// JSON-file session store.
///
/// Every operation re-reads the file, so separate processes sharing the
/// file see each other's writes. Writes within one process are serialized.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Store at `~/.secops/session.json`.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn at_default_location() -> Option<Self> {
        crate::config::default_session_file().map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Entries, SessionStoreError> {
        if !self.path.exists() {
            return Ok(Entries::new());
        }

        let file = File::open(&self.path)
            .map_err(|e| SessionStoreError::LoadFailed(format!("{}: {}", self.path.display(), e)))?;

        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| SessionStoreError::Serialization(e.to_string()))
    }

    fn write_entries(&self, entries: &Entries) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| SessionStoreError::SaveFailed(e.to_string()))?;
            }
        }

        let file = File::create(&self.path)
            .map_err(|e| SessionStoreError::SaveFailed(format!("{}: {}", self.path.display(), e)))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, entries)
            .map_err(|e| SessionStoreError::Serialization(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| SessionStoreError::SaveFailed(e.to_string()))
    }

    fn update<F>(&self, f: F) -> Result<(), SessionStoreError>
    where
        F: FnOnce(&mut Entries),
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| SessionStoreError::SaveFailed("session lock poisoned".to_string()))?;
        let mut entries = self.read_entries()?;
        f(&mut entries);
        self.write_entries(&entries)
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        Ok(self.read_entries()?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), SessionStoreError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    async fn remove(&self, key: &str) -> Result<(), SessionStoreError> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|entries| {
            entries.remove(key);
        })
    }
}
