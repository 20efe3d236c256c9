use parking_lot::Mutex;
use std::sync::{Arc, Weak};

use super::store::StoreInner;

/// A callback invoked with every new snapshot.
///
/// Listener identity is the identity of the `Arc`: registering the same
/// `Arc` twice keeps a single registration, while two separately allocated
/// closures are always two listeners even if they do the same thing.
pub type Listener<T> = Arc<dyn Fn(&Arc<T>) + Send + Sync>;

fn same_listener<T>(a: &Listener<T>, b: &Listener<T>) -> bool {
    // Compare data pointers only; vtable pointers for one closure type are
    // not guaranteed to be unique.
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

/// Set of registered listeners, iterated in registration order.
pub(crate) struct ListenerRegistry<T> {
    listeners: Mutex<Vec<Listener<T>>>,
}

impl<T> ListenerRegistry<T> {
    pub(crate) fn new() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Returns `false` if this exact listener was already registered.
    pub(crate) fn insert(&self, listener: Listener<T>) -> bool {
        let mut listeners = self.listeners.lock();
        if listeners.iter().any(|l| same_listener(l, &listener)) {
            return false;
        }
        listeners.push(listener);
        true
    }

    /// Returns `false` if the listener was not registered.
    pub(crate) fn remove(&self, listener: &Listener<T>) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|l| !same_listener(l, listener));
        listeners.len() != before
    }

    pub(crate) fn contains(&self, listener: &Listener<T>) -> bool {
        self.listeners
            .lock()
            .iter()
            .any(|l| same_listener(l, listener))
    }

    /// Copy of the current registrations, taken before a notification pass
    /// so listeners can subscribe or unsubscribe while being notified.
    pub(crate) fn snapshot(&self) -> Vec<Listener<T>> {
        self.listeners.lock().clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.lock().len()
    }
}

/// Handle returned by `subscribe`, used to remove the listener again.
///
/// Dropping a `Subscription` does **not** unsubscribe; the listener stays
/// registered until [`unsubscribe`](Self::unsubscribe) is called. Use
/// [`into_guard`](Self::into_guard) for scope-bound subscriptions.
#[must_use = "call unsubscribe() or into_guard() to remove the listener"]
pub struct Subscription<T> {
    store: Weak<StoreInner<T>>,
    listener: Listener<T>,
}

impl<T> Subscription<T> {
    pub(crate) fn new(store: Weak<StoreInner<T>>, listener: Listener<T>) -> Self {
        Self { store, listener }
    }

    /// Remove the listener from the store.
    ///
    /// Calling this more than once, or after the store has been dropped, does
    /// nothing.
    pub fn unsubscribe(&self) {
        if let Some(store) = self.store.upgrade() {
            store.unsubscribe(&self.listener);
        }
    }

    /// Whether the listener is still registered with a live store.
    pub fn is_active(&self) -> bool {
        self.store
            .upgrade()
            .is_some_and(|store| store.is_subscribed(&self.listener))
    }

    /// Convert into a guard that unsubscribes when dropped.
    pub fn into_guard(self) -> SubscriptionGuard<T> {
        SubscriptionGuard { subscription: self }
    }
}

/// RAII guard for a subscription.
pub struct SubscriptionGuard<T> {
    subscription: Subscription<T>,
}

impl<T> SubscriptionGuard<T> {
    /// Whether the guarded listener is still registered.
    pub fn is_active(&self) -> bool {
        self.subscription.is_active()
    }
}

impl<T> Drop for SubscriptionGuard<T> {
    fn drop(&mut self) {
        self.subscription.unsubscribe();
    }
}
