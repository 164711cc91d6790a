use super::store::{Store, Subscription};
use std::sync::Arc;

/// Anything that exposes a current value and change notifications.
pub trait Readable<T> {
    /// Get a clone of the current value.
    fn get(&self) -> T;

    /// Register a callback that runs immediately and after every change.
    fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static;
}

impl<T: Clone + Send + Sync + 'static> Readable<T> for Store<T> {
    fn get(&self) -> T {
        Store::get(self)
    }

    fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        Store::subscribe(self, callback)
    }
}

/// A read-only value computed from other stores.
///
/// The value is recomputed synchronously inside every upstream notification,
/// so [`get`](Derived::get) always returns the result of the computation over
/// the current upstream state. Recomputation is unconditional: subscribers are
/// notified on every upstream change even if the derived value is unchanged.
///
/// # Examples
///
/// ```
/// use tickbox::{Derived, Store};
///
/// let count = Store::new(2);
/// let doubled = Derived::from_one(&count, |n: &i32| n * 2);
/// assert_eq!(doubled.get(), 4);
///
/// count.set(5);
/// assert_eq!(doubled.get(), 10);
/// ```
pub struct Derived<T> {
    value: Store<T>,
    sources: Arc<[Subscription]>,
}

impl<T: Clone + Send + Sync + 'static> Derived<T> {
    /// Derive a value from a single source.
    pub fn from_one<A, S, F>(source: &S, compute: F) -> Self
    where
        A: Clone + Send + Sync + 'static,
        S: Readable<A>,
        F: Fn(&A) -> T + Send + Sync + 'static,
    {
        let value = Store::new(compute(&source.get()));
        let guard = source.subscribe({
            let value = value.clone();
            move |a: &A| value.set(compute(a))
        });

        Self {
            value,
            sources: Arc::from(vec![guard]),
        }
    }

    /// Derive a value from two sources.
    ///
    /// A change to either source recomputes against the latest value of the
    /// other.
    pub fn from_two<A, B, SA, SB, F>(a: &SA, b: &SB, compute: F) -> Self
    where
        A: Clone + Send + Sync + 'static,
        B: Clone + Send + Sync + 'static,
        SA: Readable<A> + Clone + Send + Sync + 'static,
        SB: Readable<B> + Clone + Send + Sync + 'static,
        F: Fn(&A, &B) -> T + Send + Sync + 'static,
    {
        let compute = Arc::new(compute);
        let value = Store::new(compute(&a.get(), &b.get()));

        let guard_a = a.subscribe({
            let value = value.clone();
            let b = b.clone();
            let compute = Arc::clone(&compute);
            move |a_val: &A| value.set(compute(a_val, &b.get()))
        });
        let guard_b = b.subscribe({
            let value = value.clone();
            let a = a.clone();
            let compute = Arc::clone(&compute);
            move |b_val: &B| value.set(compute(&a.get(), b_val))
        });

        Self {
            value,
            sources: Arc::from(vec![guard_a, guard_b]),
        }
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T {
        self.value.get()
    }

    /// Read the current value through a closure without cloning it.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.value.read(f)
    }

    /// Subscribe to recomputations.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.value.subscribe(callback)
    }

    /// Number of upstream sources this value is wired to.
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }
}

impl<T: Clone + Send + Sync + 'static> Readable<T> for Derived<T> {
    fn get(&self) -> T {
        Derived::get(self)
    }

    fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        Derived::subscribe(self, callback)
    }
}

impl<T> Clone for Derived<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            sources: Arc::clone(&self.sources),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Derived<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Derived").field("value", &self.value).finish()
    }
}
