use super::{Todo, TodoId};
use crate::environment::Environment;
use crate::error::LoadError;
use crate::storage::Storage;
use crate::store::{Readable, Store, Subscription};
use std::collections::HashSet;
use std::sync::Arc;

/// Read the persisted collection stored under `key`.
///
/// [`TodoStore`] swallows these errors and starts empty; this function is
/// for callers that need to know why.
pub fn load_todos(storage: &dyn Storage, key: &str) -> Result<Vec<Todo>, LoadError> {
    let raw = storage.get_item(key)?.ok_or(LoadError::Missing)?;
    let todos: Vec<Todo> = serde_json::from_str(&raw)?;

    let mut seen = HashSet::with_capacity(todos.len());
    for todo in &todos {
        if !seen.insert(&todo.id) {
            return Err(LoadError::DuplicateId(todo.id.clone()));
        }
    }
    Ok(todos)
}

/// The ordered todo collection, persisted after every mutation.
///
/// Every mutation is total: it updates the collection, writes the whole
/// collection to storage (when the environment has one), then notifies
/// subscribers. Operations on an unknown id leave the collection unchanged
/// but still persist and notify.
///
/// # Examples
///
/// ```
/// use tickbox::{Environment, MemoryStorage, TodoStore};
///
/// let storage = MemoryStorage::new();
/// let env = Environment::builder().storage(storage.clone()).build();
///
/// let todos = TodoStore::new(&env);
/// let id = todos.add("buy milk");
/// todos.toggle(&id);
///
/// let reloaded = TodoStore::new(&env);
/// assert_eq!(reloaded.get(), todos.get());
/// assert!(reloaded.get()[0].completed);
/// ```
#[derive(Clone)]
pub struct TodoStore {
    todos: Store<Vec<Todo>>,
    storage: Option<Arc<dyn Storage>>,
    key: String,
}

impl TodoStore {
    /// Create the store, loading any persisted collection from `env`.
    ///
    /// A missing or unreadable collection starts empty.
    pub fn new(env: &Environment) -> Self {
        let storage = env.storage().cloned();
        let key = env.keys().todos.clone();

        let initial = match storage.as_deref() {
            Some(storage) => match load_todos(storage, &key) {
                Ok(todos) => {
                    tracing::debug!(count = todos.len(), "loaded persisted todos");
                    todos
                }
                Err(LoadError::Missing) => {
                    tracing::debug!(%key, "no persisted todos");
                    Vec::new()
                }
                Err(err) => {
                    tracing::warn!(%key, %err, "discarding persisted todos");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        Self {
            todos: Store::new(initial),
            storage,
            key,
        }
    }

    /// A clone of the current collection.
    pub fn get(&self) -> Vec<Todo> {
        self.todos.get()
    }

    /// Read the collection without cloning it.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[Todo]) -> R,
    {
        self.todos.read(|todos| f(todos))
    }

    /// Subscribe to the collection. The callback runs immediately.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Vec<Todo>) + Send + Sync + 'static,
    {
        self.todos.subscribe(callback)
    }

    /// Number of todos.
    pub fn len(&self) -> usize {
        self.todos.read(Vec::len)
    }

    /// Whether there are no todos.
    pub fn is_empty(&self) -> bool {
        self.todos.read(Vec::is_empty)
    }

    /// The todo with `id`, if present.
    pub fn find(&self, id: &TodoId) -> Option<Todo> {
        self.todos
            .read(|todos| todos.iter().find(|t| &t.id == id).cloned())
    }

    /// Append a new, not completed todo and return its id.
    pub fn add(&self, text: impl Into<String>) -> TodoId {
        let todo = Todo::new(text);
        let id = todo.id.clone();
        self.mutate("add", |todos| todos.push(todo));
        id
    }

    /// Remove the todo with `id`.
    pub fn remove(&self, id: &TodoId) {
        self.mutate("remove", |todos| todos.retain(|t| &t.id != id));
    }

    /// Flip the completed flag of the todo with `id`.
    pub fn toggle(&self, id: &TodoId) {
        self.mutate("toggle", |todos| {
            if let Some(todo) = todos.iter_mut().find(|t| &t.id == id) {
                todo.completed = !todo.completed;
            }
        });
    }

    /// Replace the text of the todo with `id`.
    pub fn edit(&self, id: &TodoId, text: impl Into<String>) {
        let text = text.into();
        self.mutate("edit", |todos| {
            if let Some(todo) = todos.iter_mut().find(|t| &t.id == id) {
                todo.text = text;
            }
        });
    }

    /// Remove every completed todo.
    pub fn clear_completed(&self) {
        self.mutate("clear_completed", |todos| todos.retain(|t| !t.completed));
    }

    /// Mark every todo completed, or, if all already are, mark every todo
    /// not completed.
    ///
    /// This is one collective flip, not a per-item toggle: from a mixed
    /// state the result is all completed.
    pub fn toggle_all(&self) {
        self.mutate("toggle_all", |todos| {
            let all_completed = todos.iter().all(|t| t.completed);
            for todo in todos.iter_mut() {
                todo.completed = !all_completed;
            }
        });
    }

    fn mutate(&self, op: &'static str, f: impl FnOnce(&mut Vec<Todo>)) {
        self.todos.update(|todos| {
            f(todos);
            tracing::debug!(op, count = todos.len(), "todos updated");
            self.persist(todos);
        });
    }

    fn persist(&self, todos: &[Todo]) {
        let Some(storage) = &self.storage else {
            return;
        };
        let result = serde_json::to_string(todos)
            .map_err(crate::error::StorageError::Serialize)
            .and_then(|json| storage.set_item(&self.key, &json));
        if let Err(err) = result {
            tracing::warn!(key = %self.key, %err, "failed to persist todos");
        }
    }
}

impl Readable<Vec<Todo>> for TodoStore {
    fn get(&self) -> Vec<Todo> {
        TodoStore::get(self)
    }

    fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Vec<Todo>) + Send + Sync + 'static,
    {
        TodoStore::subscribe(self, callback)
    }
}

impl std::fmt::Debug for TodoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoStore")
            .field("todos", &self.len())
            .field("key", &self.key)
            .field("persistent", &self.storage.is_some())
            .finish()
    }
}
