//! A key-value store persisted as one JSON object file.
//!
//! The file maps every key to its string value:
//!
//! ```json
//! { "multiAppInstances": "[...]", "multiAppSettings": "{...}" }
//! ```
//!
//! A missing file is an empty store. Every write rewrites the whole file
//! through a temporary sibling and a rename. Reading a file that is not a
//! JSON object fails with [`StorageError::Corrupted`]; the next write moves
//! it aside to `<file>.corrupt` and starts over from an empty object.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, trace, warn};

use multiapp_core::utils::fs;

use super::errors::StorageError;
use super::kv_store::KeyValueStore;

type Entries = BTreeMap<String, String>;

#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Entries, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.is_not_found() => {
                trace!("Store file {:?} does not exist yet", self.path);
                return Ok(Entries::new());
            }
            Err(e) => {
                return Err(StorageError::Io { path: self.path.clone(), source: e });
            }
        };
        if content.trim().is_empty() {
            return Ok(Entries::new());
        }
        serde_json::from_str(&content).map_err(|e| StorageError::Corrupted {
            path: self.path.clone(),
            source: e,
        })
    }

    fn corrupt_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".corrupt");
        self.path.with_file_name(name)
    }

    fn write_entries(&self, entries: &Entries) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(entries).map_err(|e| StorageError::Serialize {
            path: self.path.clone(),
            source: e,
        })?;
        fs::write_string_atomically(&self.path, &content).map_err(|e| StorageError::Io {
            path: self.path.clone(),
            source: e,
        })?;
        debug!("Wrote {} key(s) to {:?}", entries.len(), self.path);
        Ok(())
    }

    fn modify(&self, apply: impl FnOnce(&mut Entries) -> bool) -> Result<(), StorageError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StorageError::Unavailable(format!("write lock for {:?} poisoned", self.path)))?;
        let mut entries = match self.read_entries() {
            Err(StorageError::Corrupted { path, source }) => {
                let backup = self.corrupt_path();
                warn!("Store file {:?} is corrupted ({}), moving it to {:?}", path, source, backup);
                fs::rename_file(&path, &backup).map_err(|e| StorageError::Io { path, source: e })?;
                Entries::new()
            }
            other => other?,
        };
        if apply(&mut entries) {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.modify(|entries| {
            entries.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.modify(|entries| entries.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(dir.path().join("store.json"));
        assert_eq!(store.get("anything").unwrap(), None);
        store.remove("anything").unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn test_values_survive_a_new_handle() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/store.json");

        let store = FileKeyValueStore::new(&path);
        store.set("multiAppInstances", "[]").unwrap();
        store.set("multiAppSettings", "{\"darkMode\":true}").unwrap();

        let reopened = FileKeyValueStore::new(&path);
        assert_eq!(reopened.get("multiAppInstances").unwrap().as_deref(), Some("[]"));
        assert_eq!(
            reopened.get("multiAppSettings").unwrap().as_deref(),
            Some("{\"darkMode\":true}")
        );

        reopened.remove("multiAppInstances").unwrap();
        assert_eq!(store.get("multiAppInstances").unwrap(), None);
        assert!(store.get("multiAppSettings").unwrap().is_some());
    }

    #[test]
    fn test_corrupted_file_is_reported_on_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileKeyValueStore::new(&path);
        assert!(matches!(store.get("k"), Err(StorageError::Corrupted { .. })));
    }

    #[test]
    fn test_write_replaces_corrupted_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "\"garbage\"").unwrap();

        let store = FileKeyValueStore::new(&path);
        store.set("k", "v").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let entries: Entries = serde_json::from_str(&content).unwrap();
        assert_eq!(entries.get("k").map(String::as_str), Some("v"));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("store.json.corrupt")).unwrap(),
            "\"garbage\""
        );
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_serialize_error_names_the_file() {
        let json_err = serde_json::from_str::<Entries>("[").unwrap_err();
        let err = StorageError::Serialize { path: PathBuf::from("/tmp/store.json"), source: json_err };
        assert_eq!(err.to_string(), "Failed to serialize key-value store \"/tmp/store.json\"");
    }

    #[test]
    fn test_directory_in_place_of_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(dir.path());
        assert!(matches!(store.get("k"), Err(StorageError::Io { .. })));
    }
}
