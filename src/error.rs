//! Error types for persistence.

use crate::todos::TodoId;
use std::path::PathBuf;

/// Failure reading or writing the key-value storage area.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backing file could not be read or written.
    #[error("storage file {}: {source}", .path.display())]
    Io {
        /// File the storage area lives in.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but is not a JSON object of strings.
    #[error("storage file {} is corrupt: {source}", .path.display())]
    Corrupt {
        /// File the storage area lives in.
        path: PathBuf,
        /// Parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be serialized before writing.
    #[error("failed to serialize value: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Why a persisted todo collection could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Nothing is stored under the key.
    #[error("no persisted value")]
    Missing,

    /// The storage area itself failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The stored value is not a valid serialized collection.
    #[error("persisted value is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Two stored records share an id.
    #[error("persisted collection repeats id {0}")]
    DuplicateId(TodoId),
}

/// A string that names no known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} {value:?}")]
pub struct ParseError {
    kind: &'static str,
    value: String,
}

impl ParseError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }

    /// The rejected input.
    pub fn value(&self) -> &str {
        &self.value
    }
}
