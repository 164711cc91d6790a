//! The todo collection, its filter selector and derived views.

mod filter;
mod list;
mod store;
mod todo;

pub use filter::{Filter, Stats};
pub use list::{filtered_todos, stats, TodoList};
pub use store::{load_todos, TodoStore};
pub use todo::{Todo, TodoId};
