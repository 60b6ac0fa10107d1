//! The recursive value model stored in a [`Context`](crate::context::Context).
//!
//! Containers own their children exclusively. Every insertion takes the item by
//! reference and stores a deep copy, so the caller's value stays independent of
//! the stored one and no two containers ever share a child.

mod convert;
mod cursor;

pub use cursor::{ArrayCursor, ObjectCursor};

use crate::errors::ValueError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An insertion-ordered map of string keys to values.
///
/// Re-inserting an existing key replaces the value in place and keeps the
/// key's original position.
pub type Object = IndexMap<String, Value>;

/// The variant tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// [`Value::None`]
    None,
    /// [`Value::Boolean`]
    Boolean,
    /// [`Value::Integer`]
    Integer,
    /// [`Value::Float`]
    Float,
    /// [`Value::String`]
    String,
    /// [`Value::Array`]
    Array,
    /// [`Value::Object`]
    Object,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Boolean => write!(f, "boolean"),
            Self::Integer => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::String => write!(f, "string"),
            Self::Array => write!(f, "array"),
            Self::Object => write!(f, "object"),
        }
    }
}

/// A recursive tagged value.
///
/// Floats keep their exact bit pattern, so NaN and the infinities round-trip.
/// Because of NaN, equality is `PartialEq` only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// The absence of a value.
    #[default]
    None,
    /// A boolean.
    Boolean(bool),
    /// A 64-bit signed integer.
    Integer(i64),
    /// A 64-bit IEEE-754 float.
    Float(f64),
    /// A string.
    String(String),
    /// An ordered sequence of values.
    Array(Vec<Value>),
    /// An insertion-ordered map of values.
    Object(Object),
}

impl Value {
    /// Creates an empty array.
    #[must_use]
    pub fn new_array() -> Self {
        Self::Array(Vec::new())
    }

    /// Creates an empty array with room for `capacity` items.
    #[must_use]
    pub fn array_with_capacity(capacity: usize) -> Self {
        Self::Array(Vec::with_capacity(capacity))
    }

    /// Creates an empty object.
    #[must_use]
    pub fn new_object() -> Self {
        Self::Object(Object::new())
    }

    /// Creates an empty object with room for `capacity` entries.
    #[must_use]
    pub fn object_with_capacity(capacity: usize) -> Self {
        Self::Object(Object::with_capacity(capacity))
    }

    /// Returns the variant tag.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::None => ValueType::None,
            Self::Boolean(_) => ValueType::Boolean,
            Self::Integer(_) => ValueType::Integer,
            Self::Float(_) => ValueType::Float,
            Self::String(_) => ValueType::String,
            Self::Array(_) => ValueType::Array,
            Self::Object(_) => ValueType::Object,
        }
    }

    /// Returns true for [`Value::None`].
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    fn mismatch(&self, expected: ValueType) -> ValueError {
        ValueError::type_mismatch(expected, self.value_type())
    }

    /// Reads a boolean.
    pub fn as_bool(&self) -> Result<bool, ValueError> {
        match self {
            Self::Boolean(value) => Ok(*value),
            _ => Err(self.mismatch(ValueType::Boolean)),
        }
    }

    /// Reads an integer.
    pub fn as_int(&self) -> Result<i64, ValueError> {
        match self {
            Self::Integer(value) => Ok(*value),
            _ => Err(self.mismatch(ValueType::Integer)),
        }
    }

    /// Reads a float.
    pub fn as_float(&self) -> Result<f64, ValueError> {
        match self {
            Self::Float(value) => Ok(*value),
            _ => Err(self.mismatch(ValueType::Float)),
        }
    }

    /// Borrows the string content.
    pub fn as_str(&self) -> Result<&str, ValueError> {
        match self {
            Self::String(value) => Ok(value),
            _ => Err(self.mismatch(ValueType::String)),
        }
    }

    /// Returns an independently owned copy of the string content.
    pub fn to_owned_string(&self) -> Result<String, ValueError> {
        self.as_str().map(str::to_owned)
    }

    /// Borrows the array items.
    pub fn as_array(&self) -> Result<&[Value], ValueError> {
        match self {
            Self::Array(items) => Ok(items),
            _ => Err(self.mismatch(ValueType::Array)),
        }
    }

    /// Borrows the object entries.
    pub fn as_object(&self) -> Result<&Object, ValueError> {
        match self {
            Self::Object(entries) => Ok(entries),
            _ => Err(self.mismatch(ValueType::Object)),
        }
    }

    fn as_array_mut(&mut self) -> Result<&mut Vec<Value>, ValueError> {
        match self {
            Self::Array(items) => Ok(items),
            other => Err(other.mismatch(ValueType::Array)),
        }
    }

    fn as_object_mut(&mut self) -> Result<&mut Object, ValueError> {
        match self {
            Self::Object(entries) => Ok(entries),
            other => Err(other.mismatch(ValueType::Object)),
        }
    }

    /// Returns the number of array items.
    pub fn array_len(&self) -> Result<usize, ValueError> {
        self.as_array().map(<[Value]>::len)
    }

    /// Borrows the array item at `index`.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `index >= len`, `TypeMismatch` if this is not an array.
    pub fn array_get(&self, index: usize) -> Result<&Value, ValueError> {
        let items = self.as_array()?;
        items
            .get(index)
            .ok_or_else(|| ValueError::out_of_range(index, items.len()))
    }

    /// Appends a deep copy of `item`.
    pub fn array_push(&mut self, item: &Value) -> Result<(), ValueError> {
        self.as_array_mut()?.push(item.clone());
        Ok(())
    }

    /// Returns the number of object entries.
    pub fn object_len(&self) -> Result<usize, ValueError> {
        self.as_object().map(Object::len)
    }

    /// Borrows the entry for `key`, or `None` if the key is absent.
    pub fn object_get(&self, key: &str) -> Result<Option<&Value>, ValueError> {
        self.as_object().map(|entries| entries.get(key))
    }

    /// Inserts a deep copy of `item` under `key`.
    ///
    /// An existing key is overwritten in place.
    pub fn object_insert(&mut self, key: impl Into<String>, item: &Value) -> Result<(), ValueError> {
        self.as_object_mut()?.insert(key.into(), item.clone());
        Ok(())
    }

    /// Creates a cursor over the array items.
    pub fn array_cursor(&self) -> Result<ArrayCursor<'_>, ValueError> {
        self.as_array().map(ArrayCursor::new)
    }

    /// Creates a cursor over the object entries.
    pub fn object_cursor(&self) -> Result<ObjectCursor<'_>, ValueError> {
        self.as_object().map(ObjectCursor::new)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", serde_json::Value::from(self))
    }
}
