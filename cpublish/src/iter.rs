//! Snapshot cursors for the boundary.
//!
//! Unlike the borrowing cursors of the core crate, these copy their container
//! when created, so later changes to the source do not affect them and the
//! source may be released first.

use crate::error::{FfiError, FfiResult};
use publish::value::Value;
use std::ffi::{CStr, CString};

/// Copied array elements and a position.
#[derive(Debug)]
pub(crate) struct ItemSnapshot {
    items: Vec<Value>,
    position: usize,
}

impl ItemSnapshot {
    pub(crate) fn new(items: &[Value]) -> Self {
        Self {
            items: items.to_vec(),
            position: 0,
        }
    }

    pub(crate) fn is_done(&self) -> bool {
        self.position >= self.items.len()
    }

    /// Moves to the next element; does nothing once done.
    pub(crate) fn advance(&mut self) {
        if !self.is_done() {
            self.position += 1;
        }
    }

    pub(crate) fn value(&self) -> Option<&Value> {
        self.items.get(self.position)
    }
}

/// Copied key/value entries and a position.
#[derive(Debug)]
pub(crate) struct EntrySnapshot {
    entries: Vec<(CString, Value)>,
    position: usize,
}

impl EntrySnapshot {
    /// Copies `entries`. Fails if a key cannot be represented as a C string.
    pub(crate) fn new<'a>(
        entries: impl IntoIterator<Item = (&'a String, &'a Value)>,
    ) -> FfiResult<Self> {
        let entries = entries
            .into_iter()
            .map(|(key, value)| {
                CString::new(key.as_str())
                    .map(|key| (key, value.clone()))
                    .map_err(|_| FfiError::InteriorNul("key"))
            })
            .collect::<FfiResult<Vec<_>>>()?;
        Ok(Self {
            entries,
            position: 0,
        })
    }

    pub(crate) fn is_done(&self) -> bool {
        self.position >= self.entries.len()
    }

    /// Moves to the next entry; does nothing once done.
    pub(crate) fn advance(&mut self) {
        if !self.is_done() {
            self.position += 1;
        }
    }

    pub(crate) fn key(&self) -> Option<&CStr> {
        self.entries.get(self.position).map(|(key, _)| key.as_c_str())
    }

    pub(crate) fn value(&self) -> Option<&Value> {
        self.entries.get(self.position).map(|(_, value)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use publish::value::Object;

    #[test]
    fn test_item_snapshot() {
        let items = vec![Value::from(1_i64), Value::from(2_i64)];
        let mut snapshot = ItemSnapshot::new(&items);

        assert_eq!(snapshot.value(), Some(&Value::Integer(1)));
        snapshot.advance();
        snapshot.advance();
        snapshot.advance();
        assert!(snapshot.is_done());
        assert!(snapshot.value().is_none());
    }

    #[test]
    fn test_entry_snapshot_rejects_nul_keys() {
        let mut object = Object::new();
        object.insert("bad\0key".to_string(), Value::None);

        assert!(matches!(
            EntrySnapshot::new(&object),
            Err(FfiError::InteriorNul("key"))
        ));
    }

    #[test]
    fn test_entry_snapshot_order() {
        let mut object = Object::new();
        object.insert("z".to_string(), Value::from(true));
        object.insert("a".to_string(), Value::from(false));

        let mut snapshot = EntrySnapshot::new(&object).unwrap();
        assert_eq!(snapshot.key().map(CStr::to_bytes), Some(&b"z"[..]));
        snapshot.advance();
        assert_eq!(snapshot.key().map(CStr::to_bytes), Some(&b"a"[..]));
        snapshot.advance();
        assert!(snapshot.is_done());
        assert!(snapshot.key().is_none());
    }
}
