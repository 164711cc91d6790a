use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak,
};

type Subscriber<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// States written while subscribers are being notified wait here.
struct Delivery<T> {
    pending: VecDeque<T>,
    draining: bool,
}

/// Resets delivery if a subscriber unwinds out of the drain loop, so later
/// writes are delivered instead of queued forever.
struct DrainGuard<'a, T> {
    delivery: &'a Mutex<Delivery<T>>,
}

impl<T> Drop for DrainGuard<'_, T> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            let mut delivery = lock(self.delivery);
            delivery.pending.clear();
            delivery.draining = false;
        }
    }
}

struct Subscribers<T> {
    next_id: AtomicUsize,
    entries: RwLock<Vec<(usize, Subscriber<T>)>>,
    delivery: Mutex<Delivery<T>>,
}

impl<T> Subscribers<T> {
    fn new() -> Self {
        Self {
            next_id: AtomicUsize::new(0),
            entries: RwLock::new(Vec::new()),
            delivery: Mutex::new(Delivery {
                pending: VecDeque::new(),
                draining: false,
            }),
        }
    }

    fn remove(&self, id: usize) {
        write_lock(&self.entries).retain(|(entry_id, _)| *entry_id != id);
    }
}

/// Removes a subscriber without knowing its value type.
trait Unsubscribe: Send + Sync {
    fn unsubscribe(&self, id: usize);
}

impl<T: Send + 'static> Unsubscribe for Subscribers<T> {
    fn unsubscribe(&self, id: usize) {
        self.remove(id);
    }
}

/// A shared, observable state container.
///
/// Every clone of a `Store` refers to the same state. Writes through
/// [`set`](Store::set) or [`update`](Store::update) notify every subscriber
/// synchronously, in registration order, before returning.
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use tickbox::Store;
///
/// let store = Store::new(1);
/// let seen = Arc::new(Mutex::new(Vec::new()));
///
/// let _sub = store.subscribe({
///     let seen = Arc::clone(&seen);
///     move |value: &i32| seen.lock().unwrap().push(*value)
/// });
///
/// store.set(2);
/// store.update(|value| *value += 1);
///
/// assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);
/// ```
pub struct Store<T> {
    state: Arc<RwLock<T>>,
    subscribers: Arc<Subscribers<T>>,
}

impl<T: Clone + Send + Sync + 'static> Store<T> {
    /// Create a new store with the given initial state.
    pub fn new(initial: T) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial)),
            subscribers: Arc::new(Subscribers::new()),
        }
    }

    /// Get a clone of the current state.
    pub fn get(&self) -> T {
        read_lock(&self.state).clone()
    }

    /// Read state through a closure without cloning it.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        let state = read_lock(&self.state);
        f(&state)
    }

    /// Update the state in place, then notify subscribers.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        {
            let mut state = write_lock(&self.state);
            f(&mut state);
        }
        self.notify();
    }

    /// Replace the state, then notify subscribers.
    pub fn set(&self, new_state: T) {
        *write_lock(&self.state) = new_state;
        self.notify();
    }

    /// Subscribe to state changes.
    ///
    /// The callback runs once immediately with the current state and then
    /// after every write. It stays registered until the returned
    /// [`Subscription`] is dropped.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.subscribers.next_id.fetch_add(1, Ordering::SeqCst);
        let callback: Subscriber<T> = Arc::new(callback);
        write_lock(&self.subscribers.entries).push((id, Arc::clone(&callback)));

        let current = self.get();
        callback(&current);

        let subscribers: Arc<dyn Unsubscribe> = self.subscribers.clone();
        Subscription {
            id,
            subscribers: Some(Arc::downgrade(&subscribers)),
        }
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        read_lock(&self.subscribers.entries).len()
    }

    /// Notify all subscribers of a state change.
    ///
    /// Runs against snapshots of the state and subscriber list so callbacks
    /// may read or write this store. A write made from inside a callback is
    /// queued and delivered after the current round, so every subscriber
    /// sees states in the order they were written.
    fn notify(&self) {
        {
            let mut delivery = lock(&self.subscribers.delivery);
            delivery.pending.push_back(self.get());
            if delivery.draining {
                return;
            }
            delivery.draining = true;
        }

        let _guard = DrainGuard {
            delivery: &self.subscribers.delivery,
        };
        loop {
            let next = {
                let mut delivery = lock(&self.subscribers.delivery);
                let next = delivery.pending.pop_front();
                if next.is_none() {
                    delivery.draining = false;
                }
                next
            };
            let Some(state) = next else { break };

            let subscribers: Vec<Subscriber<T>> = read_lock(&self.subscribers.entries)
                .iter()
                .map(|(_, subscriber)| Arc::clone(subscriber))
                .collect();

            tracing::trace!(subscribers = subscribers.len(), "notifying store subscribers");
            for subscriber in &subscribers {
                subscriber(&state);
            }
        }
    }
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}

impl<T: Clone + Default + Send + Sync + 'static> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &*read_lock(&self.state))
            .field("subscribers", &read_lock(&self.subscribers.entries).len())
            .finish()
    }
}

/// RAII guard for a store subscription.
///
/// Dropping the guard removes the callback from the store.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: usize,
    subscribers: Option<Weak<dyn Unsubscribe>>,
}

impl Subscription {
    /// Remove the callback now.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    /// Keep the callback registered for as long as the store lives.
    pub fn detach(mut self) {
        self.subscribers = None;
    }

    fn release(&mut self) {
        if let Some(subscribers) = self.subscribers.take().and_then(|weak| weak.upgrade()) {
            subscribers.unsubscribe(self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("attached", &self.subscribers.is_some())
            .finish()
    }
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
