//! Observable state store.
//!
//! A store holds its state as an immutable snapshot, replaces that snapshot on
//! every write and notifies subscribed listeners synchronously.

mod builder;
mod handles;
mod json;
mod listener;
mod store;

pub use builder::StoreBuilder;
pub use handles::{ReadStore, WatchStore, WriteStore};
pub use json::json_store_from_value;
pub use listener::{Listener, Subscription, SubscriptionGuard};
pub use store::{create_default_store, create_store, Store};
