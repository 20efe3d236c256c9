//! Split handles returned by [`create_store`](crate::create_store).
//!
//! Each handle owns a reference to the same store internals, so they can be
//! moved to different parts of an application (or different threads)
//! independently.

use std::sync::Arc;

use super::listener::{Listener, Subscription};
use super::store::StoreInner;
use crate::merge::Merge;

/// Read access to a store.
pub struct ReadStore<T> {
    inner: Arc<StoreInner<T>>,
}

impl<T> ReadStore<T> {
    pub(crate) fn new(inner: Arc<StoreInner<T>>) -> Self {
        Self { inner }
    }

    /// Get the current snapshot.
    pub fn get(&self) -> Arc<T> {
        self.inner.snapshot()
    }

    /// Read the current state with a function.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.inner.read(f)
    }
}

/// Write access to a store.
pub struct WriteStore<T> {
    inner: Arc<StoreInner<T>>,
}

impl<T> WriteStore<T> {
    pub(crate) fn new(inner: Arc<StoreInner<T>>) -> Self {
        Self { inner }
    }

    /// Shallow-merge `partial` into the state and notify every listener.
    pub fn set(&self, partial: T::Partial)
    where
        T: Merge,
    {
        self.inner.set_state(partial);
    }

    /// Set a whole new state value and notify every listener.
    pub fn replace(&self, new_state: T) {
        self.inner.replace(new_state);
    }

    /// Edit a copy of the current state and publish it.
    pub fn update(&self, f: impl FnOnce(&mut T))
    where
        T: Clone,
    {
        self.inner.update(f);
    }
}

/// Subscription access to a store.
pub struct WatchStore<T> {
    inner: Arc<StoreInner<T>>,
}

impl<T> WatchStore<T> {
    pub(crate) fn new(inner: Arc<StoreInner<T>>) -> Self {
        Self { inner }
    }

    /// Register a listener called with every new snapshot.
    pub fn subscribe<F>(&self, listener: F) -> Subscription<T>
    where
        F: Fn(&Arc<T>) + Send + Sync + 'static,
    {
        self.inner.subscribe(Arc::new(listener))
    }

    /// Register a shared listener; the same `Arc` is only registered once.
    pub fn subscribe_listener(&self, listener: Listener<T>) -> Subscription<T> {
        self.inner.subscribe(listener)
    }

    /// Number of currently registered listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.listener_count()
    }
}

macro_rules! impl_clone {
    ($($handle:ident),*) => {
        $(
            impl<T> Clone for $handle<T> {
                fn clone(&self) -> Self {
                    Self {
                        inner: Arc::clone(&self.inner),
                    }
                }
            }
        )*
    };
}

impl_clone!(ReadStore, WriteStore, WatchStore);
