use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// Dynamically typed state: string keys mapped to arbitrary JSON values.
pub type JsonState = serde_json::Map<String, serde_json::Value>;

/// A state type that can absorb a partial update.
///
/// `merge` must be shallow: every top-level entry present in `partial`
/// replaces the matching entry of `self`, every other entry is carried over
/// unchanged, and nested values are never merged recursively.
///
/// # Examples
///
/// Implementing `Merge` for a struct with an `Option`-field partial:
///
/// ```
/// use snapstore::Merge;
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Session {
///     user: String,
///     online: bool,
/// }
///
/// #[derive(Default)]
/// struct SessionPatch {
///     user: Option<String>,
///     online: Option<bool>,
/// }
///
/// impl Merge for Session {
///     type Partial = SessionPatch;
///
///     fn merge(&self, partial: SessionPatch) -> Self {
///         Self {
///             user: partial.user.unwrap_or_else(|| self.user.clone()),
///             online: partial.online.unwrap_or(self.online),
///         }
///     }
/// }
///
/// let before = Session { user: "ana".into(), online: false };
/// let after = before.merge(SessionPatch { online: Some(true), ..Default::default() });
/// assert_eq!(after, Session { user: "ana".into(), online: true });
/// ```
pub trait Merge {
    /// The shape of a partial update.
    type Partial;

    /// Build the next value from `self` overlaid with `partial`.
    fn merge(&self, partial: Self::Partial) -> Self;
}

impl Merge for JsonState {
    type Partial = JsonState;

    fn merge(&self, partial: JsonState) -> Self {
        let mut next = self.clone();
        next.extend(partial);
        next
    }
}

impl<K, V, S> Merge for HashMap<K, V, S>
where
    K: Eq + Hash + Clone,
    V: Clone,
    S: BuildHasher + Clone,
{
    type Partial = HashMap<K, V, S>;

    fn merge(&self, partial: HashMap<K, V, S>) -> Self {
        let mut next = self.clone();
        next.extend(partial);
        next
    }
}

impl<K, V> Merge for BTreeMap<K, V>
where
    K: Ord + Clone,
    V: Clone,
{
    type Partial = BTreeMap<K, V>;

    fn merge(&self, partial: BTreeMap<K, V>) -> Self {
        let mut next = self.clone();
        next.extend(partial);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn object(value: serde_json::Value) -> JsonState {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn json_merge_overwrites_and_keeps() {
        let base = object(json!({"a": 1, "b": {"x": 1}}));
        let next = base.merge(object(json!({"b": {"y": 2}, "c": [3]})));

        assert_eq!(
            serde_json::Value::Object(next),
            json!({"a": 1, "b": {"y": 2}, "c": [3]})
        );
        // the source value is left alone
        assert_eq!(
            serde_json::Value::Object(base),
            json!({"a": 1, "b": {"x": 1}})
        );
    }

    #[test]
    fn arrays_are_replaced_not_concatenated() {
        let base = object(json!({"items": [1, 2]}));
        let next = base.merge(object(json!({"items": [3]})));
        assert_eq!(next["items"], json!([3]));
    }

    #[test]
    fn empty_partial_is_value_equal() {
        let base: HashMap<&str, i32> = HashMap::from([("a", 1), ("b", 2)]);
        let next = base.merge(HashMap::new());
        assert_eq!(next, base);
    }

    #[test]
    fn btree_merge() {
        let base = BTreeMap::from([("a", 1), ("b", 2)]);
        let next = base.merge(BTreeMap::from([("b", 20), ("c", 30)]));
        assert_eq!(next, BTreeMap::from([("a", 1), ("b", 20), ("c", 30)]));
    }
}
