//! Error types for the JSON convenience layer.
//!
//! The core store operations never fail; only conversions between
//! `serde_json::Value` and the store's [`JsonState`](crate::JsonState)
//! can.

use thiserror::Error;

/// Errors produced when moving data in or out of a JSON-backed store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A JSON value that must be an object was some other kind of value.
    #[error("expected a JSON object, found {found}")]
    NotAnObject {
        /// Kind of value that was supplied (`"array"`, `"string"`, ...).
        found: &'static str,
    },

    /// Serializing into or deserializing out of the state failed.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias for fallible store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

pub(crate) fn kind_of(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
