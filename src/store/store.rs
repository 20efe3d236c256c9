use parking_lot::{ReentrantMutex, RwLock};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

use super::builder::StoreBuilder;
use super::handles::{ReadStore, WatchStore, WriteStore};
use super::listener::{Listener, ListenerRegistry, Subscription};
use crate::merge::Merge;

pub(crate) const DEFAULT_LABEL: &str = "store";

/// Shared internals behind a [`Store`] and its split handles.
pub(crate) struct StoreInner<T> {
    label: String,
    state: RwLock<Arc<T>>,
    listeners: ListenerRegistry<T>,
    // Held across store + notify so passes from different threads run in
    // commit order. Re-entrant so listeners may write back.
    writer: ReentrantMutex<()>,
}

impl<T> StoreInner<T> {
    pub(crate) fn new(label: String, initial: T) -> Self {
        Self {
            label,
            state: RwLock::new(Arc::new(initial)),
            listeners: ListenerRegistry::new(),
            writer: ReentrantMutex::new(()),
        }
    }

    pub(crate) fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn snapshot(&self) -> Arc<T> {
        Arc::clone(&*self.state.read())
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let state = self.state.read();
        f(&state)
    }

    pub(crate) fn set_state(&self, partial: T::Partial)
    where
        T: Merge,
    {
        self.commit_with(|current| current.merge(partial));
    }

    pub(crate) fn replace(&self, next: T) {
        self.commit_with(|_| next);
    }

    pub(crate) fn update(&self, f: impl FnOnce(&mut T))
    where
        T: Clone,
    {
        self.commit_with(|current| {
            let mut next = current.clone();
            f(&mut next);
            next
        });
    }

    /// Build the next snapshot from the current one and publish it.
    ///
    /// The writer lock is held until every listener has returned, so
    /// listeners observe snapshots in the order they were stored. The state
    /// lock itself is released before notifying, so listeners can read.
    fn commit_with(&self, next: impl FnOnce(&T) -> T) {
        let _writer = self.writer.lock();
        let snapshot = {
            let mut state = self.state.write();
            let snapshot = Arc::new(next(&state));
            *state = Arc::clone(&snapshot);
            snapshot
        };
        self.notify(&snapshot);
    }

    fn notify(&self, snapshot: &Arc<T>) {
        let listeners = self.listeners.snapshot();
        trace!(
            store = %self.label,
            listeners = listeners.len(),
            "state updated"
        );
        for listener in &listeners {
            listener(snapshot);
        }
    }

    pub(crate) fn subscribe(self: &Arc<Self>, listener: Listener<T>) -> Subscription<T> {
        if self.listeners.insert(Arc::clone(&listener)) {
            debug!(
                store = %self.label,
                listeners = self.listeners.len(),
                "listener subscribed"
            );
        } else {
            debug!(store = %self.label, "listener already subscribed");
        }
        Subscription::new(Arc::downgrade(self), listener)
    }

    pub(crate) fn unsubscribe(&self, listener: &Listener<T>) {
        if self.listeners.remove(listener) {
            debug!(
                store = %self.label,
                listeners = self.listeners.len(),
                "listener unsubscribed"
            );
        }
    }

    pub(crate) fn is_subscribed(&self, listener: &Listener<T>) -> bool {
        self.listeners.contains(listener)
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

/// A thread-safe observable state container.
///
/// The store holds its current state as an immutable snapshot (`Arc<T>`).
/// Every write produces a brand-new snapshot and then synchronously calls
/// every subscribed listener with it, on the writer's thread. Snapshots
/// handed out earlier are never modified.
///
/// Listeners are collected before each notification pass: a listener
/// subscribed during a pass is first called on the next write, and one
/// unsubscribed during a pass is still called for that pass.
///
/// # Examples
///
/// ```
/// use snapstore::{JsonState, Store};
/// use serde_json::json;
///
/// let store = Store::<JsonState>::from_value(json!({"a": 1})).unwrap();
/// let sub = store.subscribe(|state| println!("now: {state:?}"));
///
/// store.set_json(json!({"b": 2})).unwrap();
/// assert_eq!(store.to_value(), json!({"a": 1, "b": 2}));
///
/// sub.unsubscribe();
/// ```
pub struct Store<T> {
    inner: Arc<StoreInner<T>>,
}

impl<T> Store<T> {
    /// Create a new store owning `initial` as its first snapshot.
    ///
    /// The value is moved into a fresh allocation; callers that keep their
    /// own copy can change it freely without affecting the store.
    pub fn new(initial: T) -> Self {
        Self::with_label(DEFAULT_LABEL, initial)
    }

    /// Configure a store before creating it.
    pub fn builder() -> StoreBuilder<T> {
        StoreBuilder::new()
    }

    pub(crate) fn with_label(label: impl Into<String>, initial: T) -> Self {
        Self {
            inner: Arc::new(StoreInner::new(label.into(), initial)),
        }
    }

    /// The label recorded on this store's log events.
    pub fn label(&self) -> &str {
        self.inner.label()
    }

    /// Get the current snapshot.
    ///
    /// Calls made between two writes return the same allocation
    /// (`Arc::ptr_eq` holds).
    pub fn get_state(&self) -> Arc<T> {
        self.inner.snapshot()
    }

    /// Read the current state without cloning the snapshot handle.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.inner.read(f)
    }

    /// Shallow-merge `partial` into the state and notify every listener.
    ///
    /// An empty partial still produces a new snapshot and still notifies.
    pub fn set_state(&self, partial: T::Partial)
    where
        T: Merge,
    {
        self.inner.set_state(partial);
    }

    /// Set a whole new state value and notify every listener.
    pub fn replace(&self, new_state: T) {
        self.inner.replace(new_state);
    }

    /// Update the state using a function.
    ///
    /// The function edits a copy of the current snapshot, which then becomes
    /// the next snapshot.
    pub fn update<F>(&self, f: F)
    where
        T: Clone,
        F: FnOnce(&mut T),
    {
        self.inner.update(f);
    }

    /// Subscribe to state changes.
    ///
    /// Each call registers a new listener, even for identical closures.
    pub fn subscribe<F>(&self, listener: F) -> Subscription<T>
    where
        F: Fn(&Arc<T>) + Send + Sync + 'static,
    {
        self.inner.subscribe(Arc::new(listener))
    }

    /// Subscribe a shared listener.
    ///
    /// Subscribing the same `Arc` again keeps a single registration.
    pub fn subscribe_listener(&self, listener: Listener<T>) -> Subscription<T> {
        self.inner.subscribe(listener)
    }

    /// Number of currently registered listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.listener_count()
    }

    /// Split into independent read, write and subscribe handles.
    pub fn split(&self) -> (ReadStore<T>, WriteStore<T>, WatchStore<T>) {
        (
            ReadStore::new(Arc::clone(&self.inner)),
            WriteStore::new(Arc::clone(&self.inner)),
            WatchStore::new(Arc::clone(&self.inner)),
        )
    }
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("label", &self.inner.label())
            .field("state", &self.inner.snapshot())
            .field("listeners", &self.inner.listener_count())
            .finish()
    }
}

/// Create a store and return its read, write and subscribe handles.
///
/// # Example
///
/// ```
/// use snapstore::create_store;
/// use std::collections::HashMap;
///
/// let (get, set, watch) = create_store(HashMap::from([("a", 1)]));
/// let sub = watch.subscribe(|state| assert_eq!(state["b"], 2));
///
/// set.set(HashMap::from([("b", 2)]));
/// sub.unsubscribe();
///
/// assert_eq!(get.get().len(), 2);
/// ```
pub fn create_store<T>(initial: T) -> (ReadStore<T>, WriteStore<T>, WatchStore<T>) {
    Store::new(initial).split()
}

/// Create a store starting from `T::default()` and return its handles.
pub fn create_default_store<T: Default>() -> (ReadStore<T>, WriteStore<T>, WatchStore<T>) {
    create_store(T::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Clone, Debug, PartialEq)]
    struct AppState {
        count: usize,
        name: String,
    }

    fn app_store() -> Store<AppState> {
        Store::new(AppState {
            count: 0,
            name: "test".to_string(),
        })
    }

    #[test]
    fn store_get_replace() {
        let store = app_store();

        assert_eq!(store.get_state().count, 0);

        store.replace(AppState {
            count: 42,
            name: "updated".to_string(),
        });

        assert_eq!(store.get_state().count, 42);
        assert_eq!(store.get_state().name, "updated");
    }

    #[test]
    fn store_update_is_copy_on_write() {
        let store = app_store();
        let before = store.get_state();

        store.update(|state| {
            state.count += 10;
        });

        assert_eq!(store.get_state().count, 10);
        assert_eq!(before.count, 0);
    }

    #[test]
    fn get_state_returns_same_snapshot_until_written() {
        let store = app_store();
        let a = store.get_state();
        let b = store.get_state();
        assert!(Arc::ptr_eq(&a, &b));

        store.update(|_| {});
        assert!(!Arc::ptr_eq(&a, &store.get_state()));
    }

    #[test]
    fn store_subscribe() {
        let store = app_store();

        let call_count = Arc::new(AtomicUsize::new(0));
        let call_count_clone = call_count.clone();

        let _ = store.subscribe(move |_state| {
            call_count_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(call_count.load(Ordering::SeqCst), 0);

        store.update(|state| state.count += 1);
        assert_eq!(call_count.load(Ordering::SeqCst), 1);

        store.update(|state| state.count += 1);
        assert_eq!(call_count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn listener_receives_the_stored_snapshot() {
        let store = Store::new(BTreeMap::from([("a", 1)]));
        let seen = Arc::new(Mutex::new(None));
        let seen_clone = seen.clone();

        let _ = store.subscribe(move |state| {
            *seen_clone.lock().unwrap() = Some(Arc::clone(state));
        });
        store.set_state(BTreeMap::from([("b", 2)]));

        let seen = seen.lock().unwrap().clone().unwrap();
        assert!(Arc::ptr_eq(&seen, &store.get_state()));
    }

    #[test]
    fn listener_can_write_back_without_deadlock() {
        let store = Store::new(BTreeMap::from([("n", 0)]));
        let writer = store.clone();

        let _ = store.subscribe(move |state| {
            if state["n"] < 3 {
                writer.set_state(BTreeMap::from([("n", state["n"] + 1)]));
            }
        });
        store.set_state(BTreeMap::from([("n", 1)]));

        assert_eq!(store.get_state()["n"], 3);
    }

    #[test]
    fn builder_label_is_kept() {
        let store: Store<AppState> = Store::builder().label("session").build(AppState {
            count: 0,
            name: String::new(),
        });
        assert_eq!(store.label(), "session");
        assert_eq!(app_store().label(), DEFAULT_LABEL);
    }

    #[test]
    fn debug_shows_state_and_listeners() {
        let store = Store::new(1u8);
        let _ = store.subscribe(|_| {});
        let rendered = format!("{store:?}");
        assert!(rendered.contains("state: 1"));
        assert!(rendered.contains("listeners: 1"));
    }
}
