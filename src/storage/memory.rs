use super::Storage;
use crate::error::StorageError;
use crate::store::{read_lock, write_lock};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// An in-process storage area.
///
/// Clones share the same map, so a clone kept by a test can inspect what a
/// store persisted.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create an empty storage area.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage area pre-populated with `items`.
    pub fn with_items<I, K, V>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let items = items
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            items: Arc::new(RwLock::new(items)),
        }
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        read_lock(&self.items).len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        read_lock(&self.items).is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(read_lock(&self.items).get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        write_lock(&self.items).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        write_lock(&self.items).remove(key);
        Ok(())
    }
}
