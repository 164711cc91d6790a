use crate::store::{Store, Subscription};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Listener for OS colour-scheme changes; receives the new "prefers dark".
pub type ChangeListener = Box<dyn Fn(bool) + Send + Sync>;

/// The OS-level "prefers dark colour scheme" signal.
pub trait ColorSchemeQuery: Send + Sync {
    /// Whether the OS currently prefers a dark scheme.
    fn prefers_dark(&self) -> bool;

    /// Call `listener` each time the preference changes. The listener is not
    /// called for the current value.
    fn on_change(&self, listener: ChangeListener) -> Subscription;
}

/// An in-process colour-scheme signal.
///
/// Hosts forward OS notifications into
/// [`set_prefers_dark`](MediaQuery::set_prefers_dark); listeners fire only
/// when the value actually changes.
#[derive(Clone, Debug)]
pub struct MediaQuery {
    matches: Store<bool>,
}

impl MediaQuery {
    /// Create a query with the given initial preference.
    pub fn new(prefers_dark: bool) -> Self {
        Self {
            matches: Store::new(prefers_dark),
        }
    }

    /// Record a new OS preference, notifying listeners if it changed.
    pub fn set_prefers_dark(&self, prefers_dark: bool) {
        if self.matches.get() != prefers_dark {
            tracing::debug!(prefers_dark, "colour scheme preference changed");
            self.matches.set(prefers_dark);
        }
    }
}

impl ColorSchemeQuery for MediaQuery {
    fn prefers_dark(&self) -> bool {
        self.matches.get()
    }

    fn on_change(&self, listener: ChangeListener) -> Subscription {
        // Store subscriptions fire immediately; change listeners must not.
        let primed = AtomicBool::new(false);
        self.matches.subscribe(move |dark| {
            if primed.swap(true, Ordering::SeqCst) {
                listener(*dark);
            }
        })
    }
}

/// A single global "dark mode active" flag for consumers that style off a
/// boolean rather than subscribing to the theme store.
pub trait DarkModeFlag: Send + Sync {
    /// Set or clear the flag.
    fn set_dark(&self, dark: bool);

    /// Current flag state.
    fn is_dark(&self) -> bool;
}

/// An atomic in-process [`DarkModeFlag`]. Clones share the flag.
#[derive(Clone, Debug, Default)]
pub struct DocumentFlag {
    dark: Arc<AtomicBool>,
}

impl DocumentFlag {
    /// Create a cleared flag.
    pub fn new() -> Self {
        Self::default()
    }
}

impl DarkModeFlag for DocumentFlag {
    fn set_dark(&self, dark: bool) {
        self.dark.store(dark, Ordering::SeqCst);
    }

    fn is_dark(&self) -> bool {
        self.dark.load(Ordering::SeqCst)
    }
}
