use super::{Filter, Stats, Todo, TodoStore};
use crate::environment::Environment;
use crate::store::{Derived, Store};

/// Todos passing the current filter, recomputed when either changes.
pub fn filtered_todos(todos: &TodoStore, filter: &Store<Filter>) -> Derived<Vec<Todo>> {
    Derived::from_two(todos, filter, |todos: &Vec<Todo>, filter: &Filter| {
        filter.apply(todos)
    })
}

/// Counts over the collection, recomputed on every change.
pub fn stats(todos: &TodoStore) -> Derived<Stats> {
    Derived::from_one(todos, |todos: &Vec<Todo>| Stats::of(todos))
}

/// A todo store wired to its filter selector and derived views.
///
/// # Examples
///
/// ```
/// use tickbox::{Environment, Filter, TodoList};
///
/// let list = TodoList::new(&Environment::headless());
/// let milk = list.todos.add("buy milk");
/// list.todos.add("walk dog");
/// list.todos.toggle(&milk);
///
/// list.set_filter(Filter::Active);
/// assert_eq!(list.filtered.get().len(), 1);
/// assert_eq!(list.stats.get().completed, 1);
/// ```
#[derive(Clone, Debug)]
pub struct TodoList {
    /// The collection.
    pub todos: TodoStore,
    /// Current filter selector. Not persisted.
    pub filter: Store<Filter>,
    /// `todos` under `filter`.
    pub filtered: Derived<Vec<Todo>>,
    /// Counts over `todos`.
    pub stats: Derived<Stats>,
}

impl TodoList {
    /// Load the collection from `env` and wire up the views with the filter
    /// set to [`Filter::All`].
    pub fn new(env: &Environment) -> Self {
        Self::from_store(TodoStore::new(env))
    }

    /// Wire views around an existing store.
    pub fn from_store(todos: TodoStore) -> Self {
        let filter = Store::new(Filter::default());
        let filtered = filtered_todos(&todos, &filter);
        let stats = stats(&todos);
        Self {
            todos,
            filter,
            filtered,
            stats,
        }
    }

    /// Change the filter selector.
    pub fn set_filter(&self, filter: Filter) {
        tracing::debug!(%filter, "filter changed");
        self.filter.set(filter);
    }
}
