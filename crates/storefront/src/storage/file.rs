//! JSON-file store.
//!
//! The whole key space lives in one JSON object. Every operation re-reads the
//! file, so separate processes (one per page view in the CLI) see each
//! other's writes. Writes go to a sibling temp file that is synced and then
//! renamed over the original, which makes each write, including a multi-key
//! [`remove_all`](KeyValueStore::remove_all), all-or-nothing.

use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::{KeyValueStore, StorageError};

/// Store persisted to a single JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&serde_json::to_vec_pretty(values)?)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    fn update(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, String>) -> bool,
    ) -> Result<(), StorageError> {
        let mut values = self.read()?;
        if f(&mut values) {
            self.write(&values)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|values| {
            values.insert(key.to_owned(), value.to_owned());
            true
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(|values| values.remove(key).is_some())
    }

    fn remove_all(&self, keys: &[&str]) -> Result<(), StorageError> {
        self.update(|values| {
            let mut changed = false;
            for key in keys {
                changed |= values.remove(*key).is_some();
            }
            changed
        })
    }

    fn is_transactional(&self) -> bool {
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::keys;

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("storage.json"));
        assert_eq!(store.get(keys::CART).unwrap(), None);
        store.remove(keys::CART).unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn test_values_survive_new_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        FileStore::new(&path).set(keys::TOKEN, "abc").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get(keys::TOKEN).unwrap().as_deref(), Some("abc"));
        let entries: Vec<_> = fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, ["storage.json"]);
    }

    #[test]
    fn test_remove_all_in_one_write() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("storage.json"));
        store.set(keys::USER, r#"{"name":"A"}"#).unwrap();
        store.set(keys::TOKEN, "t").unwrap();
        store.set(keys::CART, "[]").unwrap();
        store.set("theme", "dark").unwrap();

        store.remove_all(&keys::SIGN_OUT).unwrap();

        for key in keys::SIGN_OUT {
            assert_eq!(store.get(key).unwrap(), None);
        }
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(
            store.get(keys::CART),
            Err(StorageError::Corrupt(_))
        ));
        assert!(store.set(keys::CART, "[]").is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "not json");
    }
}
