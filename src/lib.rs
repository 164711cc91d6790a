//! # Tickbox
//!
//! Reactive state for a todo list and a light/dark theme preference.
//!
//! ## Stores (primitives)
//!
//! - `Store<T>` - observable value; subscribers run synchronously on every write
//! - `Derived<T>` - read-only value recomputed whenever its sources change
//! - `Subscription` - RAII handle that unsubscribes on drop
//!
//! ## Application state
//!
//! - `TodoStore` - ordered todo collection, persisted wholesale after every mutation
//! - `TodoList` - a `TodoStore` plus its filter selector and the filtered/stats views
//! - `ThemeStore` - theme preference that follows the OS until the user picks one
//!
//! Persistence and OS signals are injected through an [`Environment`]; with
//! none supplied everything runs in memory with default values.
//!
//! ```
//! use tickbox::{Environment, Filter, MemoryStorage, TodoList};
//!
//! let storage = MemoryStorage::new();
//! let env = Environment::builder().storage(storage).build();
//!
//! let list = TodoList::new(&env);
//! let id = list.todos.add("buy milk");
//! list.todos.toggle(&id);
//!
//! assert_eq!(list.stats.get().completed, 1);
//! list.set_filter(Filter::Active);
//! assert!(list.filtered.get().is_empty());
//! ```

pub mod config;
pub mod environment;
pub mod error;
pub mod storage;
pub mod store;
pub mod theme;
pub mod todos;

// Re-export main types for convenience
pub use config::StorageKeys;
pub use environment::{ColorSchemeQuery, DarkModeFlag, DocumentFlag, Environment, MediaQuery};
pub use error::{LoadError, ParseError, StorageError};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{Derived, Readable, Store, Subscription};
pub use theme::{Theme, ThemeStore};
pub use todos::{Filter, Stats, Todo, TodoId, TodoList, TodoStore};
