use super::Storage;
use crate::error::StorageError;
use crate::store::{read_lock, write_lock};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// A storage area kept as a JSON object in a single file.
///
/// The file is read once on [`open`](FileStorage::open) and rewritten in full
/// on every write, going through a sibling temporary file so a crash never
/// leaves a half-written document behind. A write that fails to reach disk
/// leaves the in-memory view unchanged.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: RwLock<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open the storage file at `path`. A missing file opens empty and is
    /// created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let items = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => {
                serde_json::from_str(&contents).map_err(|source| StorageError::Corrupt {
                    path: path.clone(),
                    source,
                })?
            }
            Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        tracing::debug!(path = %path.display(), keys = items.len(), "opened file storage");
        Ok(Self {
            path,
            items: RwLock::new(items),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let contents = serde_json::to_string_pretty(items).map_err(StorageError::Serialize)?;
        let tmp = self.path.with_extension("tmp");

        fs::write(&tmp, contents).map_err(|source| StorageError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(read_lock(&self.items).get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = write_lock(&self.items);
        let mut next = items.clone();
        next.insert(key.to_string(), value.to_string());
        self.flush(&next)?;
        *items = next;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = write_lock(&self.items);
        if !items.contains_key(key) {
            return Ok(());
        }
        let mut next = items.clone();
        next.remove(key);
        self.flush(&next)?;
        *items = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("state.json")).unwrap();
        assert_eq!(storage.get_item("todos").unwrap(), None);
    }

    #[test]
    fn writes_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let storage = FileStorage::open(&path).unwrap();
        storage.set_item("theme", "dark").unwrap();
        storage.set_item("todos", "[]").unwrap();
        storage.remove_item("todos").unwrap();
        drop(storage);

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get_item("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(reopened.get_item("todos").unwrap(), None);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{not json").unwrap();

        let err = FileStorage::open(&path).unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { .. }));
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("nope").join("state.json")).unwrap();

        let err = storage.set_item("theme", "light").unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
    }

    #[test]
    fn failed_write_is_not_visible() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("nope").join("state.json")).unwrap();

        assert!(storage.set_item("theme", "dark").is_err());
        assert_eq!(storage.get_item("theme").unwrap(), None);
    }

    #[test]
    fn failed_remove_keeps_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let storage = FileStorage::open(&path).unwrap();
        storage.set_item("theme", "dark").unwrap();

        // Swap the target for a directory so the rename fails.
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(storage.remove_item("theme").is_err());
        assert_eq!(storage.get_item("theme").unwrap().as_deref(), Some("dark"));
    }
}
