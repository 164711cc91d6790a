use super::{ColorSchemeQuery, DarkModeFlag};
use crate::config::StorageKeys;
use crate::storage::Storage;
use std::sync::Arc;

/// The capabilities available to the stores.
///
/// An environment with both a storage area and a colour-scheme query is
/// "browser-like": the theme store reads preferences from it. Without those
/// the stores fall back to defaults and keep state in memory only.
#[derive(Clone, Default)]
pub struct Environment {
    storage: Option<Arc<dyn Storage>>,
    color_scheme: Option<Arc<dyn ColorSchemeQuery>>,
    dark_mode_flag: Option<Arc<dyn DarkModeFlag>>,
    keys: StorageKeys,
}

impl Environment {
    /// An environment with no capabilities.
    pub fn headless() -> Self {
        Self::default()
    }

    /// Start building an environment.
    pub fn builder() -> EnvironmentBuilder {
        EnvironmentBuilder::default()
    }

    /// The storage area, if any.
    pub fn storage(&self) -> Option<&Arc<dyn Storage>> {
        self.storage.as_ref()
    }

    /// The OS colour-scheme query, if any.
    pub fn color_scheme(&self) -> Option<&Arc<dyn ColorSchemeQuery>> {
        self.color_scheme.as_ref()
    }

    /// The global dark-mode flag, if any.
    pub fn dark_mode_flag(&self) -> Option<&Arc<dyn DarkModeFlag>> {
        self.dark_mode_flag.as_ref()
    }

    /// Storage key names.
    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Whether both storage and an OS colour-scheme query are present.
    pub fn is_browser_like(&self) -> bool {
        self.storage.is_some() && self.color_scheme.is_some()
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("storage", &self.storage.is_some())
            .field("color_scheme", &self.color_scheme.is_some())
            .field("dark_mode_flag", &self.dark_mode_flag.is_some())
            .field("keys", &self.keys)
            .finish()
    }
}

/// Builder for [`Environment`].
#[derive(Default)]
pub struct EnvironmentBuilder {
    env: Environment,
}

impl EnvironmentBuilder {
    /// Persist through `storage`.
    pub fn storage(mut self, storage: impl Storage + 'static) -> Self {
        self.env.storage = Some(Arc::new(storage));
        self
    }

    /// Persist through an already shared storage area.
    pub fn shared_storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.env.storage = Some(storage);
        self
    }

    /// Read the OS colour-scheme preference from `query`.
    pub fn color_scheme(mut self, query: impl ColorSchemeQuery + 'static) -> Self {
        self.env.color_scheme = Some(Arc::new(query));
        self
    }

    /// Mirror the theme into `flag`.
    pub fn dark_mode_flag(mut self, flag: impl DarkModeFlag + 'static) -> Self {
        self.env.dark_mode_flag = Some(Arc::new(flag));
        self
    }

    /// Use non-default storage key names.
    pub fn keys(mut self, keys: StorageKeys) -> Self {
        self.env.keys = keys;
        self
    }

    /// Finish building.
    pub fn build(self) -> Environment {
        self.env
    }
}
