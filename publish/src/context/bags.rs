//! The ordered state bag threaded through a publish.

use crate::value::{Object, ObjectCursor, Value};
use serde::{Deserialize, Serialize};

/// An insertion-ordered, string-keyed bag of [`Value`]s.
///
/// A context follows the same contract as an object value: inserting deep
/// copies the item, re-setting a key overwrites it in place, and `clone`
/// produces a fully independent copy. Stages receive a context by shared
/// reference and return a new one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context {
    data: Object,
}

impl Context {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty context with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Object::with_capacity(capacity),
        }
    }

    /// Borrows the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Checks if a key exists.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Stores a deep copy of `value` under `key`.
    ///
    /// An existing key keeps its position and gets the new value.
    pub fn set(&mut self, key: impl Into<String>, value: &Value) {
        self.insert(key, value.clone());
    }

    /// Stores an owned value under `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key.into(), value.into());
    }

    /// Stores [`Value::None`] under `key`.
    pub fn set_none(&mut self, key: impl Into<String>) {
        self.insert(key, Value::None);
    }

    /// Stores a boolean under `key`.
    pub fn set_bool(&mut self, key: impl Into<String>, value: bool) {
        self.insert(key, value);
    }

    /// Stores an integer under `key`.
    pub fn set_int(&mut self, key: impl Into<String>, value: i64) {
        self.insert(key, value);
    }

    /// Stores a float under `key`.
    pub fn set_float(&mut self, key: impl Into<String>, value: f64) {
        self.insert(key, value);
    }

    /// Stores a copy of `value` as a string under `key`.
    pub fn set_string(&mut self, key: impl Into<String>, value: &str) {
        self.insert(key, value);
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the context is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.data.keys().map(String::as_str)
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.data.iter()
    }

    /// Creates a cursor over the entries.
    #[must_use]
    pub fn cursor(&self) -> ObjectCursor<'_> {
        ObjectCursor::new(&self.data)
    }

    /// Borrows the entries as an object map.
    #[must_use]
    pub fn as_object(&self) -> &Object {
        &self.data
    }

    /// Serializes the context to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses a context from a JSON object string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl From<Object> for Context {
    fn from(data: Object) -> Self {
        Self { data }
    }
}

impl From<Context> for Value {
    fn from(context: Context) -> Self {
        Self::Object(context.data)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Context {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_set_and_get() {
        let mut ctx = Context::new();
        ctx.set("key", &Value::from("value"));

        assert_eq!(ctx.get("key"), Some(&Value::from("value")));
        assert!(ctx.contains_key("key"));
        assert!(!ctx.contains_key("other"));
    }

    #[test]
    fn test_context_overwrite() {
        let mut ctx = Context::new();
        ctx.set_int("key", 1);
        ctx.set_int("key", 2);

        assert_eq!(ctx.len(), 1);
        assert_eq!(ctx.get("key"), Some(&Value::Integer(2)));
    }

    #[test]
    fn test_context_from_iter() {
        let ctx: Context = vec![("a", Value::from(1_i64)), ("b", Value::None)]
            .into_iter()
            .collect();

        assert_eq!(ctx.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_context_into_value() {
        let mut ctx = Context::new();
        ctx.set_bool("flag", true);

        let value = Value::from(ctx);
        assert_eq!(value.object_get("flag").unwrap(), Some(&Value::Boolean(true)));
    }
}
