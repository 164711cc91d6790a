//! Storage key configuration.

use serde::{Deserialize, Serialize};

/// Default key for the theme preference.
pub const THEME_KEY: &str = "theme";

/// Default key for the serialized todo collection.
pub const TODOS_KEY: &str = "todos";

/// Names of the slots the stores use in the storage area.
///
/// The theme and todo stores must use disjoint keys.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    /// Slot holding `"light"` or `"dark"`.
    pub theme: String,
    /// Slot holding the JSON todo collection.
    pub todos: String,
}

impl StorageKeys {
    /// Keys with a common prefix, e.g. `app.theme` and `app.todos`.
    pub fn prefixed(prefix: &str) -> Self {
        Self {
            theme: format!("{prefix}.{THEME_KEY}"),
            todos: format!("{prefix}.{TODOS_KEY}"),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            theme: THEME_KEY.to_string(),
            todos: TODOS_KEY.to_string(),
        }
    }
}
