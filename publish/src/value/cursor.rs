//! Position-tracking cursors over arrays, objects and contexts.
//!
//! A cursor borrows its container, so the container cannot change while the
//! cursor is alive and the cursor cannot outlive it. Advancing a cursor that
//! is already done is a no-op.
//!
//! Both cursors also implement [`Iterator`], yielding the current element and
//! then advancing.

use super::{Object, Value};

/// A cursor over the items of an array.
#[derive(Debug, Clone)]
pub struct ArrayCursor<'a> {
    items: &'a [Value],
    position: usize,
}

impl<'a> ArrayCursor<'a> {
    pub(crate) fn new(items: &'a [Value]) -> Self {
        Self { items, position: 0 }
    }

    /// Returns true once every item has been visited.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.position >= self.items.len()
    }

    /// Moves to the next item.
    pub fn advance(&mut self) {
        if !self.is_done() {
            self.position += 1;
        }
    }

    /// Borrows the current item, or `None` once done.
    #[must_use]
    pub fn value(&self) -> Option<&'a Value> {
        self.items.get(self.position)
    }

    /// Returns the index of the current item.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns how many items are left, including the current one.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.items.len().saturating_sub(self.position)
    }
}

impl<'a> Iterator for ArrayCursor<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.value();
        self.advance();
        current
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

impl ExactSizeIterator for ArrayCursor<'_> {}

/// A cursor over the entries of an object or context, in insertion order.
#[derive(Debug, Clone)]
pub struct ObjectCursor<'a> {
    entries: &'a Object,
    position: usize,
}

impl<'a> ObjectCursor<'a> {
    pub(crate) fn new(entries: &'a Object) -> Self {
        Self {
            entries,
            position: 0,
        }
    }

    /// Returns true once every entry has been visited.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.position >= self.entries.len()
    }

    /// Moves to the next entry.
    pub fn advance(&mut self) {
        if !self.is_done() {
            self.position += 1;
        }
    }

    /// Borrows the current key and value, or `None` once done.
    #[must_use]
    pub fn entry(&self) -> Option<(&'a str, &'a Value)> {
        self.entries
            .get_index(self.position)
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Borrows the current key.
    #[must_use]
    pub fn key(&self) -> Option<&'a str> {
        self.entry().map(|(key, _)| key)
    }

    /// Borrows the current value.
    #[must_use]
    pub fn value(&self) -> Option<&'a Value> {
        self.entry().map(|(_, value)| value)
    }

    /// Returns how many entries are left, including the current one.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.entries.len().saturating_sub(self.position)
    }
}

impl<'a> Iterator for ObjectCursor<'a> {
    type Item = (&'a str, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.entry();
        self.advance();
        current
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

impl ExactSizeIterator for ObjectCursor<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_cursor_empty_is_done() {
        let value = Value::new_array();
        let cursor = value.array_cursor().unwrap();
        assert!(cursor.is_done());
        assert!(cursor.value().is_none());
    }

    #[test]
    fn test_array_cursor_advance_past_end_is_noop() {
        let value: Value = vec![Value::from(true)].into();
        let mut cursor = value.array_cursor().unwrap();

        cursor.advance();
        assert!(cursor.is_done());
        cursor.advance();
        cursor.advance();
        assert!(cursor.is_done());
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_object_cursor_yields_entries() {
        let mut value = Value::new_object();
        value.object_insert("a", &Value::from(1_i64)).unwrap();
        value.object_insert("b", &Value::from(2_i64)).unwrap();

        let collected: Vec<(&str, &Value)> = value.object_cursor().unwrap().collect();
        assert_eq!(
            collected,
            vec![("a", &Value::Integer(1)), ("b", &Value::Integer(2))]
        );
    }

    #[test]
    fn test_cursor_size_hint() {
        let value: Value = vec![Value::None, Value::None, Value::None].into();
        let mut cursor = value.array_cursor().unwrap();
        cursor.advance();
        assert_eq!(cursor.len(), 2);
    }
}
