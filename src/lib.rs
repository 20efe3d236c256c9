//! # Snapstore
//!
//! An observable state store for Rust.
//!
//! A [`Store`] holds the current state as an immutable snapshot. Writes
//! shallow-merge a partial update into a *new* snapshot and then notify every
//! subscribed listener synchronously, on the writer's thread. Snapshots that
//! were handed out earlier never change.
//!
//! ## Store
//!
//! - [`Store<T>`] - Thread-safe state container with `get_state`, `set_state`
//!   and `subscribe`
//! - [`create_store`] - Build a store and split it into read, write and
//!   subscribe handles
//! - [`Subscription`] - Handle used to unsubscribe a listener
//!
//! ## Merge
//!
//! - [`Merge`] - Shallow merge of a partial update into a state value,
//!   implemented for [`JsonState`], `HashMap` and `BTreeMap`
//!
//! ## Example
//!
//! ```
//! use snapstore::create_store;
//! use std::collections::BTreeMap;
//! use std::sync::{Arc, Mutex};
//!
//! let (get, set, watch) = create_store(BTreeMap::from([("a", 1)]));
//!
//! let seen = Arc::new(Mutex::new(BTreeMap::new()));
//! let seen_clone = seen.clone();
//! let sub = watch.subscribe(move |state| {
//!     *seen_clone.lock().unwrap() = (**state).clone();
//! });
//!
//! set.set(BTreeMap::from([("b", 2)]));
//! assert_eq!(*seen.lock().unwrap(), BTreeMap::from([("a", 1), ("b", 2)]));
//!
//! sub.unsubscribe();
//! set.set(BTreeMap::from([("a", 9)]));
//! assert_eq!(*seen.lock().unwrap(), BTreeMap::from([("a", 1), ("b", 2)]));
//! assert_eq!(*get.get(), BTreeMap::from([("a", 9), ("b", 2)]));
//! ```

pub mod error;
pub mod merge;
pub mod store;

// Re-export main types for convenience
pub use error::{Result, StoreError};
pub use merge::{JsonState, Merge};
pub use store::{
    create_default_store, create_store, json_store_from_value, Listener, ReadStore, Store,
    StoreBuilder, Subscription, SubscriptionGuard, WatchStore, WriteStore,
};

