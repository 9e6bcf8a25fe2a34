//! String key-value storage backing the session and theme stores.

#[cfg(test)]
use std::{cell::RefCell, rc::Rc};
use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read state file at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write state file at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode state file: {0}")]
    Encode(#[source] serde_json::Error),
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// JSON object on disk, rewritten atomically on every change.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(source) if source.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(error) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %error,
                    "state file is corrupt, starting from empty state"
                );
                Ok(BTreeMap::new())
            }
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let encoded = serde_json::to_string_pretty(entries).map_err(StorageError::Encode)?;
        let write_error = |source| StorageError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }

        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, encoded).map_err(write_error)?;
        fs::rename(&tmp_path, &self.path).map_err(write_error)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_owned(), value.to_owned());
        self.write_entries(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.write_entries(&entries)
    }
}

/// In-process store. Clones share the same entries, which lets tests build a
/// fresh store over the state an earlier one wrote.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_returns_none_when_file_is_missing() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let store = FileStore::new(dir.path().join("state.json"));

        assert_eq!(store.get("auth_token").expect("get should succeed"), None);
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("nested").join("state.json");

        let mut writer = FileStore::new(&path);
        writer.set("theme_dark", "true").expect("set should succeed");
        writer.set("auth_token", "abc").expect("set should succeed");
        writer.remove("auth_token").expect("remove should succeed");

        let reader = FileStore::new(&path);
        assert_eq!(
            reader.get("theme_dark").expect("get should succeed"),
            Some("true".to_owned())
        );
        assert_eq!(reader.get("auth_token").expect("get should succeed"), None);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn corrupt_file_reads_as_empty_and_is_replaced_on_write() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("state.json");
        fs::write(&path, "{not json").expect("fixture should be written");

        let mut store = FileStore::new(&path);
        assert_eq!(store.get("user_data").expect("get should succeed"), None);

        store.set("theme_dark", "false").expect("set should succeed");
        assert_eq!(
            store.get("theme_dark").expect("get should succeed"),
            Some("false".to_owned())
        );
    }

    #[test]
    fn memory_store_clones_share_entries() {
        let mut first = MemoryStore::default();
        let second = first.clone();

        first.set("key", "value").expect("set should succeed");

        assert_eq!(
            second.get("key").expect("get should succeed"),
            Some("value".to_owned())
        );
        assert!(second.contains("key"));
    }
}
