use super::Theme;
use crate::environment::{ColorSchemeQuery, DarkModeFlag, Environment};
use crate::storage::Storage;
use crate::store::{lock, Store, Subscription};
use std::sync::{Arc, Mutex};

/// What an OS change listener needs, without holding the query it listens to.
#[derive(Clone)]
struct Preference {
    value: Store<Theme>,
    storage: Option<Arc<dyn Storage>>,
    flag: Option<Arc<dyn DarkModeFlag>>,
    key: String,
}

impl Preference {
    /// The explicitly stored theme, if there is a valid one.
    fn stored(&self) -> Option<Theme> {
        let storage = self.storage.as_ref()?;
        match storage.get_item(&self.key) {
            Ok(Some(raw)) => match raw.parse() {
                Ok(theme) => Some(theme),
                Err(err) => {
                    tracing::warn!(key = %self.key, %err, "ignoring stored theme");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(key = %self.key, %err, "failed to read stored theme");
                None
            }
        }
    }

    /// Whether anything is stored under the key, valid theme or not.
    fn has_stored_value(&self) -> bool {
        let Some(storage) = &self.storage else {
            return false;
        };
        match storage.get_item(&self.key) {
            Ok(raw) => raw.is_some_and(|raw| !raw.is_empty()),
            Err(err) => {
                tracing::warn!(key = %self.key, %err, "failed to read stored theme");
                false
            }
        }
    }

    fn persist(&self, theme: Theme) {
        if let Some(storage) = &self.storage {
            if let Err(err) = storage.set_item(&self.key, theme.as_str()) {
                tracing::warn!(key = %self.key, %err, "failed to persist theme");
            }
        }
    }

    fn apply_flag(&self, theme: Theme) {
        if let Some(flag) = &self.flag {
            flag.set_dark(theme.is_dark());
        }
    }

    /// Follow an OS preference change unless the user picked a theme.
    fn follow_os(&self, prefers_dark: bool) {
        if self.has_stored_value() {
            tracing::debug!("explicit theme stored, ignoring OS change");
            return;
        }
        let theme = Theme::from_prefers_dark(prefers_dark);
        tracing::debug!(%theme, "following OS colour scheme");
        self.value.set(theme);
        self.apply_flag(theme);
    }
}

/// The current theme, persisted under the `theme` key.
///
/// Without a browser-like [`Environment`] the theme starts as
/// [`Theme::Light`] and only changes through [`toggle`](ThemeStore::toggle).
///
/// # Examples
///
/// ```
/// use tickbox::{DocumentFlag, Environment, MediaQuery, MemoryStorage, Theme, ThemeStore};
///
/// let os = MediaQuery::new(true);
/// let flag = DocumentFlag::new();
/// let env = Environment::builder()
///     .storage(MemoryStorage::new())
///     .color_scheme(os.clone())
///     .dark_mode_flag(flag.clone())
///     .build();
///
/// let theme = ThemeStore::new(&env);
/// theme.init();
/// assert_eq!(theme.get(), Theme::Dark);
///
/// os.set_prefers_dark(false);
/// assert_eq!(theme.get(), Theme::Light);
///
/// theme.toggle();
/// os.set_prefers_dark(true);
/// os.set_prefers_dark(false);
/// assert_eq!(theme.get(), Theme::Dark);
/// ```
#[derive(Clone)]
pub struct ThemeStore {
    preference: Preference,
    color_scheme: Option<Arc<dyn ColorSchemeQuery>>,
    os_listener: Arc<Mutex<Option<Subscription>>>,
}

impl ThemeStore {
    /// Create the store, resolving the initial theme from `env`.
    pub fn new(env: &Environment) -> Self {
        let preference = Preference {
            value: Store::new(Theme::Light),
            storage: env.storage().cloned(),
            flag: env.dark_mode_flag().cloned(),
            key: env.keys().theme.clone(),
        };
        let store = Self {
            preference,
            color_scheme: env.color_scheme().cloned(),
            os_listener: Arc::new(Mutex::new(None)),
        };

        let initial = store.resolve();
        store.preference.value.set(initial);
        tracing::debug!(theme = %initial, "theme store created");
        store
    }

    /// Current theme.
    pub fn get(&self) -> Theme {
        self.preference.value.get()
    }

    /// Subscribe to theme changes. The callback runs immediately.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Theme) + Send + Sync + 'static,
    {
        self.preference.value.subscribe(callback)
    }

    /// Whether the storage area holds an explicit choice. Any non-empty
    /// stored value counts, even one that is not a valid theme.
    pub fn has_explicit_preference(&self) -> bool {
        self.preference.has_stored_value()
    }

    /// Flip the theme, persist the choice and mirror it into the dark-mode
    /// flag. After this the store no longer follows OS changes.
    pub fn toggle(&self) {
        let next = self.get().toggled();
        tracing::debug!(theme = %next, "toggling theme");
        self.preference.persist(next);
        self.preference.value.set(next);
        self.preference.apply_flag(next);
    }

    /// Re-resolve the theme, apply the dark-mode flag and start following OS
    /// preference changes while no explicit choice is stored.
    ///
    /// Does nothing outside a browser-like environment. Repeated calls
    /// re-resolve but register only one OS listener.
    pub fn init(&self) {
        let Some(query) = self.browser_query() else {
            tracing::debug!("no storage or colour-scheme query, theme init skipped");
            return;
        };

        let theme = self.resolve();
        self.preference.value.set(theme);
        self.preference.apply_flag(theme);

        let mut listener = lock(&self.os_listener);
        if listener.is_none() {
            let preference = self.preference.clone();
            *listener = Some(query.on_change(Box::new(move |prefers_dark: bool| {
                preference.follow_os(prefers_dark);
            })));
        }
    }

    fn browser_query(&self) -> Option<&Arc<dyn ColorSchemeQuery>> {
        self.preference.storage.as_ref()?;
        self.color_scheme.as_ref()
    }

    fn resolve(&self) -> Theme {
        match self.browser_query() {
            Some(query) => self
                .preference
                .stored()
                .unwrap_or_else(|| Theme::from_prefers_dark(query.prefers_dark())),
            None => Theme::Light,
        }
    }
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("theme", &self.get())
            .field("following_os", &lock(&self.os_listener).is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{DocumentFlag, MediaQuery};
    use crate::storage::MemoryStorage;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Harness {
        storage: MemoryStorage,
        os: MediaQuery,
        flag: DocumentFlag,
        env: Environment,
    }

    fn browser(prefers_dark: bool, stored: Option<&str>) -> Harness {
        let storage = match stored {
            Some(value) => MemoryStorage::with_items([("theme", value)]),
            None => MemoryStorage::new(),
        };
        let os = MediaQuery::new(prefers_dark);
        let flag = DocumentFlag::new();
        let env = Environment::builder()
            .storage(storage.clone())
            .color_scheme(os.clone())
            .dark_mode_flag(flag.clone())
            .build();
        Harness {
            storage,
            os,
            flag,
            env,
        }
    }

    #[test]
    fn headless_defaults_to_light() {
        let store = ThemeStore::new(&Environment::headless());
        assert_eq!(store.get(), Theme::Light);

        store.init();
        assert_eq!(store.get(), Theme::Light);
    }

    #[test]
    fn stored_value_wins_over_os() {
        let h = browser(true, Some("light"));
        let store = ThemeStore::new(&h.env);
        assert_eq!(store.get(), Theme::Light);
        assert!(store.has_explicit_preference());
    }

    #[test]
    fn os_preference_used_when_nothing_stored() {
        let h = browser(true, None);
        let store = ThemeStore::new(&h.env);
        assert_eq!(store.get(), Theme::Dark);
        assert!(!store.has_explicit_preference());
    }

    #[test]
    fn invalid_stored_value_falls_back_to_os() {
        let h = browser(true, Some("sepia"));
        let store = ThemeStore::new(&h.env);
        assert_eq!(store.get(), Theme::Dark);
    }

    #[test]
    fn invalid_stored_value_still_stops_following_os() {
        let h = browser(true, Some("sepia"));
        let store = ThemeStore::new(&h.env);
        assert!(store.has_explicit_preference());

        store.init();
        assert_eq!(store.get(), Theme::Dark);

        h.os.set_prefers_dark(false);
        assert_eq!(store.get(), Theme::Dark);
        assert!(h.flag.is_dark());
    }

    #[test]
    fn empty_stored_value_counts_as_no_preference() {
        let h = browser(false, Some(""));
        let store = ThemeStore::new(&h.env);
        assert!(!store.has_explicit_preference());

        store.init();
        h.os.set_prefers_dark(true);
        assert_eq!(store.get(), Theme::Dark);
    }

    #[test]
    fn toggle_persists_notifies_and_sets_flag() {
        let h = browser(false, None);
        let store = ThemeStore::new(&h.env);
        let calls = Arc::new(AtomicUsize::new(0));
        let _sub = store.subscribe({
            let calls = Arc::clone(&calls);
            move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
            }
        });

        store.toggle();

        assert_eq!(store.get(), Theme::Dark);
        assert_eq!(h.storage.get_item("theme").unwrap().as_deref(), Some("dark"));
        assert!(h.flag.is_dark());
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        store.toggle();
        assert_eq!(store.get(), Theme::Light);
        assert!(!h.flag.is_dark());
    }

    #[test]
    fn init_applies_flag_and_follows_os_until_explicit_choice() {
        let h = browser(true, None);
        let store = ThemeStore::new(&h.env);

        store.init();
        assert_eq!(store.get(), Theme::Dark);
        assert!(h.flag.is_dark());

        h.os.set_prefers_dark(false);
        assert_eq!(store.get(), Theme::Light);
        assert!(!h.flag.is_dark());
        assert_eq!(h.storage.get_item("theme").unwrap(), None);

        store.toggle();
        assert_eq!(store.get(), Theme::Dark);

        h.os.set_prefers_dark(true);
        h.os.set_prefers_dark(false);
        assert_eq!(store.get(), Theme::Dark);
        assert!(h.flag.is_dark());
    }

    #[test]
    fn repeated_init_registers_one_listener() {
        let h = browser(false, None);
        let store = ThemeStore::new(&h.env);
        let calls = Arc::new(AtomicUsize::new(0));

        store.init();
        store.init();

        let _sub = store.subscribe({
            let calls = Arc::clone(&calls);
            move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
            }
        });
        h.os.set_prefers_dark(true);

        // One immediate call plus one for the OS change.
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn toggle_without_storage_still_flips() {
        let flag = DocumentFlag::new();
        let env = Environment::builder().dark_mode_flag(flag.clone()).build();
        let store = ThemeStore::new(&env);

        store.toggle();
        assert_eq!(store.get(), Theme::Dark);
        assert!(flag.is_dark());
    }
}
