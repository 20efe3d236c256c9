use std::marker::PhantomData;

use super::store::{Store, DEFAULT_LABEL};

/// Builder for a [`Store`].
///
/// # Example
///
/// ```
/// use snapstore::Store;
///
/// let store = Store::builder().label("settings").build(vec![1, 2, 3]);
/// assert_eq!(store.label(), "settings");
/// ```
pub struct StoreBuilder<T> {
    label: String,
    _state: PhantomData<fn() -> T>,
}

impl<T> StoreBuilder<T> {
    pub(crate) fn new() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            _state: PhantomData,
        }
    }

    /// Name recorded on every log event the store emits.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Create the store with `initial` as its first snapshot.
    pub fn build(self, initial: T) -> Store<T> {
        Store::with_label(self.label, initial)
    }

    /// Create the store starting from `T::default()`.
    pub fn build_default(self) -> Store<T>
    where
        T: Default,
    {
        self.build(T::default())
    }
}
