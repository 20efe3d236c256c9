//! JSON helpers for stores holding a [`JsonState`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::store::Store;
use crate::error::{kind_of, Result, StoreError};
use crate::merge::JsonState;

fn into_object(value: Value) -> Result<JsonState> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::NotAnObject {
            found: kind_of(&other),
        }),
    }
}

/// Create a JSON store from an object value.
///
/// # Errors
///
/// Returns [`StoreError::NotAnObject`] if `initial` is not a JSON object.
pub fn json_store_from_value(initial: Value) -> Result<Store<JsonState>> {
    Ok(Store::new(into_object(initial)?))
}

impl Store<JsonState> {
    /// Create a store from an object value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotAnObject`] if `initial` is not a JSON object.
    pub fn from_value(initial: Value) -> Result<Self> {
        json_store_from_value(initial)
    }

    /// Shallow-merge an object value into the state.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotAnObject`] if `partial` is not a JSON object.
    /// The state is left untouched and no listener is called.
    pub fn set_json(&self, partial: Value) -> Result<()> {
        self.set_state(into_object(partial)?);
        Ok(())
    }

    /// Serialize `partial` and shallow-merge the resulting object.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`] if serialization fails, or
    /// [`StoreError::NotAnObject`] if it does not produce an object.
    pub fn set_serialized<S: Serialize>(&self, partial: &S) -> Result<()> {
        self.set_json(serde_json::to_value(partial)?)
    }

    /// Deserialize a single top-level field, or `None` if it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`] if the field does not have the
    /// requested shape.
    pub fn get_field<D: DeserializeOwned>(&self, key: &str) -> Result<Option<D>> {
        self.read(|state| {
            state
                .get(key)
                .map(|value| D::deserialize(value).map_err(StoreError::from))
                .transpose()
        })
    }

    /// The current snapshot as a JSON object value.
    pub fn to_value(&self) -> Value {
        self.read(|state| Value::Object(state.clone()))
    }
}
