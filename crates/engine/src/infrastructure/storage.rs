//! Session storage adapters.

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::infrastructure::ports::{StorageError, StoragePort};

/// File-backed key/value storage.
///
/// All keys live in one JSON object on disk. The file is read once at
/// construction and replaced after every mutation by writing a sibling temp
/// file and renaming it over the original, so a crash mid-write leaves the
/// previous snapshot intact.
pub struct JsonFileStorage {
    path: PathBuf,
    cache: RwLock<HashMap<String, String>>,
}

impl JsonFileStorage {
    /// Open the store at `path`. A missing or unreadable file yields an empty
    /// store; the next save replaces it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let cache = if path.exists() {
            match fs::read_to_string(&path) {
                Ok(data) => match serde_json::from_str::<HashMap<String, String>>(&data) {
                    Ok(map) => map,
                    Err(e) => {
                        tracing::warn!(path = %path.display(), "Failed to parse storage file: {}", e);
                        HashMap::new()
                    }
                },
                Err(e) => {
                    tracing::warn!(path = %path.display(), "Failed to read storage file: {}", e);
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        tracing::debug!(path = %path.display(), "File storage initialized");

        Self {
            path,
            cache: RwLock::new(cache),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, snapshot: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| StorageError::unavailable("create_dir", e))?;
            }
        }

        let data = serde_json::to_string_pretty(snapshot).map_err(StorageError::serialization)?;

        let tmp_path = self.temp_path();
        let mut tmp_file =
            File::create(&tmp_path).map_err(|e| StorageError::unavailable("write", e))?;
        tmp_file
            .write_all(data.as_bytes())
            .and_then(|()| tmp_file.sync_all())
            .map_err(|e| StorageError::unavailable("write", e))?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path).map_err(|e| StorageError::unavailable("rename", e))
    }

    /// `state.json` -> `state.json.tmp`, in the same directory.
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("closer_state.json"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn mutate(
        &self,
        operation: &'static str,
        apply: impl FnOnce(&mut HashMap<String, String>),
    ) -> Result<(), StorageError> {
        let snapshot = {
            let mut guard = self
                .cache
                .write()
                .map_err(|e| StorageError::unavailable(operation, e))?;
            apply(&mut *guard);
            guard.clone()
        };
        // Lock released before I/O
        self.persist(&snapshot)
    }
}

impl StoragePort for JsonFileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .cache
            .read()
            .map_err(|e| StorageError::unavailable("load", e))?;
        Ok(guard.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.mutate("save", |map| {
            map.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.mutate("remove", |map| {
            map.remove(key);
        })
    }
}

/// In-memory storage for tests and throwaway sessions.
#[derive(Default)]
pub struct InMemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value, e.g. a hand-written blob in tests.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        if let Ok(mut guard) = storage.entries.write() {
            guard.insert(key.to_string(), value.to_string());
        }
        storage
    }
}

impl StoragePort for InMemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .read()
            .map_err(|e| StorageError::unavailable("load", e))?;
        Ok(guard.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .write()
            .map_err(|e| StorageError::unavailable("save", e))?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .write()
            .map_err(|e| StorageError::unavailable("remove", e))?;
        guard.remove(key);
        Ok(())
    }
}
