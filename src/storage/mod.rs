//! Key-value persistence backends.
//!
//! Stores never touch a storage area directly; they are handed an
//! implementation of [`Storage`] through the
//! [`Environment`](crate::Environment).

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::StorageError;

/// A string key-value storage area shared by every store in the process.
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key`. Deleting a missing key succeeds.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
