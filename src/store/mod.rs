//! Observable state containers.
//!
//! A [`Store`] holds a value and a registry of callbacks invoked synchronously
//! on every write. A [`Derived`] is a read-only value recomputed from one or
//! two upstream sources whenever they change. Both implement [`Readable`].

mod derived;
mod store;

pub use derived::{Derived, Readable};
pub use store::{Store, Subscription};

pub(crate) use store::{lock, read_lock, write_lock};
