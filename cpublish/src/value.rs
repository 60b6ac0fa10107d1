//! Value handles.

use crate::args;
use crate::error::{FfiError, FfiResult};
use crate::iter::{EntrySnapshot, ItemSnapshot};
use crate::status::{report, CPublishStatus};
use crate::string::{CPublishString, CPublishStringView};
use publish::value::{Value, ValueType};
use std::ffi::c_char;
use std::ptr::{null, null_mut};

/// A handle to a [`Value`].
///
/// Handles returned as `*mut` are owned by the caller and released with
/// [`cpublish_value_destroy`]. Handles returned as `*const` borrow from their
/// container and must not be destroyed.
#[derive(Debug, Clone, PartialEq)]
#[repr(transparent)]
pub struct CPublishValue {
    value: Value,
}

impl CPublishValue {
    /// Borrows the wrapped value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Unwraps the value.
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Views a borrowed value as a handle.
    pub(crate) fn from_ref(value: &Value) -> *const Self {
        (value as *const Value).cast::<Self>()
    }

    fn boxed(value: Value) -> *mut Self {
        Box::into_raw(Box::new(Self { value }))
    }
}

impl From<Value> for CPublishValue {
    fn from(value: Value) -> Self {
        Self { value }
    }
}

/// Variant tag of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub enum CPublishValueType {
    /// No value.
    CPublishValueTypeNone,
    /// A boolean.
    CPublishValueTypeBoolean,
    /// A 64-bit signed integer.
    CPublishValueTypeInteger,
    /// A 64-bit float.
    CPublishValueTypeFloat,
    /// A string.
    CPublishValueTypeString,
    /// An array.
    CPublishValueTypeArray,
    /// An ordered object.
    CPublishValueTypeObject,
}

impl From<ValueType> for CPublishValueType {
    fn from(value_type: ValueType) -> Self {
        match value_type {
            ValueType::None => Self::CPublishValueTypeNone,
            ValueType::Boolean => Self::CPublishValueTypeBoolean,
            ValueType::Integer => Self::CPublishValueTypeInteger,
            ValueType::Float => Self::CPublishValueTypeFloat,
            ValueType::String => Self::CPublishValueTypeString,
            ValueType::Array => Self::CPublishValueTypeArray,
            ValueType::Object => Self::CPublishValueTypeObject,
        }
    }
}

/// Snapshot cursor over an array value.
#[derive(Debug)]
pub struct CPublishValueIterArray {
    items: ItemSnapshot,
}

/// Snapshot cursor over an object value.
#[derive(Debug)]
pub struct CPublishValueIterObject {
    entries: EntrySnapshot,
}

unsafe fn value_ref<'a>(value: *const CPublishValue) -> FfiResult<&'a Value> {
    unsafe { args::borrow(value, "value") }.map(CPublishValue::value)
}

unsafe fn value_mut<'a>(value: *mut CPublishValue) -> FfiResult<&'a mut Value> {
    unsafe { args::borrow_mut(value, "value") }.map(|handle| &mut handle.value)
}

// Constructors

/// Creates a none value.
#[no_mangle]
pub extern "C" fn cpublish_value_new_none() -> *mut CPublishValue {
    CPublishValue::boxed(Value::None)
}

/// Creates a boolean value.
#[no_mangle]
pub extern "C" fn cpublish_value_new_bool(value: bool) -> *mut CPublishValue {
    CPublishValue::boxed(Value::Boolean(value))
}

/// Creates an integer value.
#[no_mangle]
pub extern "C" fn cpublish_value_new_int(value: i64) -> *mut CPublishValue {
    CPublishValue::boxed(Value::Integer(value))
}

/// Creates a float value.
#[no_mangle]
pub extern "C" fn cpublish_value_new_float(value: f64) -> *mut CPublishValue {
    CPublishValue::boxed(Value::Float(value))
}

/// Creates a string value from a copy of `value`. Invalid UTF-8 is replaced.
///
/// Returns null if `value` is null.
///
/// # Safety
///
/// A non-null `value` must be NUL-terminated.
#[no_mangle]
pub unsafe extern "C" fn cpublish_value_new_string(value: *const c_char) -> *mut CPublishValue {
    match unsafe { args::text(value, "value") } {
        Ok(text) => CPublishValue::boxed(Value::String(text)),
        Err(_) => null_mut(),
    }
}

/// Creates an empty array.
#[no_mangle]
pub extern "C" fn cpublish_value_new_array() -> *mut CPublishValue {
    CPublishValue::boxed(Value::new_array())
}

/// Creates an empty array with room for `capacity` elements.
#[no_mangle]
pub extern "C" fn cpublish_value_new_array_with_capacity(capacity: usize) -> *mut CPublishValue {
    CPublishValue::boxed(Value::array_with_capacity(capacity))
}

/// Creates an empty object.
#[no_mangle]
pub extern "C" fn cpublish_value_new_object() -> *mut CPublishValue {
    CPublishValue::boxed(Value::new_object())
}

/// Creates an empty object with room for `capacity` entries.
#[no_mangle]
pub extern "C" fn cpublish_value_new_object_with_capacity(capacity: usize) -> *mut CPublishValue {
    CPublishValue::boxed(Value::object_with_capacity(capacity))
}

/// Releases an owned value. Null is ignored.
///
/// # Safety
///
/// `value` must be null or an owned handle not yet destroyed.
#[no_mangle]
pub unsafe extern "C" fn cpublish_value_destroy(value: *mut CPublishValue) {
    if !value.is_null() {
        drop(unsafe { Box::from_raw(value) });
    }
}

// Accessors

/// Returns the variant tag of `value`.
///
/// # Safety
///
/// `value` must be null or a live handle; `status` must be null or initialized.
#[no_mangle]
pub unsafe extern "C" fn cpublish_value_type(
    value: *const CPublishValue,
    status: *mut CPublishStatus,
) -> CPublishValueType {
    let result = unsafe { value_ref(value) }.map(|value| value.value_type().into());
    unsafe { report(status, result) }.unwrap_or(CPublishValueType::CPublishValueTypeNone)
}

/// Reads a boolean.
///
/// # Safety
///
/// See [`cpublish_value_type`].
#[no_mangle]
pub unsafe extern "C" fn cpublish_value_bool(
    value: *const CPublishValue,
    status: *mut CPublishStatus,
) -> bool {
    let result = unsafe { value_ref(value) }.and_then(|value| Ok(value.as_bool()?));
    unsafe { report(status, result) }.unwrap_or_default()
}

/// Reads an integer.
///
/// # Safety
///
/// See [`cpublish_value_type`].
#[no_mangle]
pub unsafe extern "C" fn cpublish_value_int(
    value: *const CPublishValue,
    status: *mut CPublishStatus,
) -> i64 {
    let result = unsafe { value_ref(value) }.and_then(|value| Ok(value.as_int()?));
    unsafe { report(status, result) }.unwrap_or_default()
}

/// Reads a float.
///
/// # Safety
///
/// See [`cpublish_value_type`].
#[no_mangle]
pub unsafe extern "C" fn cpublish_value_float(
    value: *const CPublishValue,
    status: *mut CPublishStatus,
) -> f64 {
    let result = unsafe { value_ref(value) }.and_then(|value| Ok(value.as_float()?));
    unsafe { report(status, result) }.unwrap_or_default()
}

/// Returns an owned copy of a string value.
///
/// The copy is independent of `value` and must be released with
/// [`cpublish_string_destroy`](crate::cpublish_string_destroy).
///
/// # Safety
///
/// See [`cpublish_value_type`].
#[no_mangle]
pub unsafe extern "C" fn cpublish_value_string(
    value: *const CPublishValue,
    status: *mut CPublishStatus,
) -> CPublishString {
    let result = unsafe { value_ref(value) }.and_then(|value| {
        let text = value.as_str()?;
        CPublishString::new(text).map_err(|_| FfiError::InteriorNul("string"))
    });
    unsafe { report(status, result) }.unwrap_or_else(CPublishString::null)
}

// Arrays

/// Returns the number of elements in an array.
///
/// # Safety
///
/// See [`cpublish_value_type`].
#[no_mangle]
pub unsafe extern "C" fn cpublish_value_array_len(
    value: *const CPublishValue,
    status: *mut CPublishStatus,
) -> usize {
    let result = unsafe { value_ref(value) }.and_then(|value| Ok(value.array_len()?));
    unsafe { report(status, result) }.unwrap_or_default()
}

/// Borrows the element at `index`.
///
/// The handle is valid until the array is modified or destroyed.
///
/// # Safety
///
/// See [`cpublish_value_type`].
#[no_mangle]
pub unsafe extern "C" fn cpublish_value_array_get(
    value: *const CPublishValue,
    index: usize,
    status: *mut CPublishStatus,
) -> *const CPublishValue {
    let result = unsafe { value_ref(value) }
        .and_then(|value| Ok(CPublishValue::from_ref(value.array_get(index)?)));
    unsafe { report(status, result) }.unwrap_or(null())
}

/// Appends a deep copy of `item`. The caller keeps ownership of `item`.
///
/// # Safety
///
/// `value` and `item` must be null or live handles; `status` must be null or
/// initialized.
#[no_mangle]
pub unsafe extern "C" fn cpublish_value_array_push(
    value: *mut CPublishValue,
    item: *const CPublishValue,
    status: *mut CPublishStatus,
) {
    // copied first so that pushing an array into itself stays sound
    let result = unsafe { args::borrow(item, "item") }.and_then(|item| {
        let item = item.value().clone();
        let value = unsafe { value_mut(value) }?;
        Ok(value.array_push(&item)?)
    });
    unsafe { report(status, result) };
}

/// Creates a snapshot cursor over an array.
///
/// Release it with [`cpublish_value_iter_array_destroy`].
///
/// # Safety
///
/// See [`cpublish_value_type`].
#[no_mangle]
pub unsafe extern "C" fn cpublish_value_array_iter(
    value: *const CPublishValue,
    status: *mut CPublishStatus,
) -> *mut CPublishValueIterArray {
    let result = unsafe { value_ref(value) }.and_then(|value| {
        let items = ItemSnapshot::new(value.as_array()?);
        Ok(Box::into_raw(Box::new(CPublishValueIterArray { items })))
    });
    unsafe { report(status, result) }.unwrap_or(null_mut())
}

// Objects

/// Returns the number of entries in an object.
///
/// # Safety
///
/// See [`cpublish_value_type`].
#[no_mangle]
pub unsafe extern "C" fn cpublish_value_object_len(
    value: *const CPublishValue,
    status: *mut CPublishStatus,
) -> usize {
    let result = unsafe { value_ref(value) }.and_then(|value| Ok(value.object_len()?));
    unsafe { report(status, result) }.unwrap_or_default()
}

/// Borrows the value stored under `key`.
///
/// An absent key yields null with an Ok status.
///
/// # Safety
///
/// `value` must be null or a live handle, a non-null `key` must be
/// NUL-terminated, and `status` must be null or initialized.
#[no_mangle]
pub unsafe extern "C" fn cpublish_value_object_get(
    value: *const CPublishValue,
    key: *const c_char,
    status: *mut CPublishStatus,
) -> *const CPublishValue {
    let result = unsafe { value_ref(value) }.and_then(|value| {
        let key = unsafe { args::key(key) }?;
        Ok(value
            .object_get(key)?
            .map_or(null(), CPublishValue::from_ref))
    });
    unsafe { report(status, result) }.unwrap_or(null())
}

/// Stores a deep copy of `item` under `key`, overwriting in place.
///
/// # Safety
///
/// See [`cpublish_value_object_get`] and [`cpublish_value_array_push`].
#[no_mangle]
pub unsafe extern "C" fn cpublish_value_object_insert(
    value: *mut CPublishValue,
    key: *const c_char,
    item: *const CPublishValue,
    status: *mut CPublishStatus,
) {
    let result = unsafe { args::borrow(item, "item") }.and_then(|item| {
        let item = item.value().clone();
        let key = unsafe { args::key(key) }?;
        let value = unsafe { value_mut(value) }?;
        Ok(value.object_insert(key, &item)?)
    });
    unsafe { report(status, result) };
}

/// Creates a snapshot cursor over an object.
///
/// Release it with [`cpublish_value_iter_object_destroy`].
///
/// # Safety
///
/// See [`cpublish_value_type`].
#[no_mangle]
pub unsafe extern "C" fn cpublish_value_object_iter(
    value: *const CPublishValue,
    status: *mut CPublishStatus,
) -> *mut CPublishValueIterObject {
    let result = unsafe { value_ref(value) }.and_then(|value| {
        let entries = EntrySnapshot::new(value.as_object()?)?;
        Ok(Box::into_raw(Box::new(CPublishValueIterObject { entries })))
    });
    unsafe { report(status, result) }.unwrap_or(null_mut())
}

// Array cursors

/// Releases an array cursor. Null is ignored.
///
/// # Safety
///
/// `iter` must be null or a cursor not yet destroyed.
#[no_mangle]
pub unsafe extern "C" fn cpublish_value_iter_array_destroy(iter: *mut CPublishValueIterArray) {
    if !iter.is_null() {
        drop(unsafe { Box::from_raw(iter) });
    }
}

/// Advances an array cursor. Advancing a finished cursor does nothing.
///
/// # Safety
///
/// `iter` must be null or a live cursor; `status` must be null or initialized.
#[no_mangle]
pub unsafe extern "C" fn cpublish_value_iter_array_next(
    iter: *mut CPublishValueIterArray,
    status: *mut CPublishStatus,
) {
    let result = unsafe { args::borrow_mut(iter, "iter") }.map(|iter| iter.items.advance());
    unsafe { report(status, result) };
}

/// Returns true once an array cursor has visited every element.
///
/// # Safety
///
/// See [`cpublish_value_iter_array_next`].
#[no_mangle]
pub unsafe extern "C" fn cpublish_value_iter_array_is_done(
    iter: *const CPublishValueIterArray,
    status: *mut CPublishStatus,
) -> bool {
    let result = unsafe { args::borrow(iter, "iter") }.map(|iter| iter.items.is_done());
    unsafe { report(status, result) }.unwrap_or(true)
}

/// Borrows the current element, or null once done.
///
/// # Safety
///
/// See [`cpublish_value_iter_array_next`].
#[no_mangle]
pub unsafe extern "C" fn cpublish_value_iter_array_value(
    iter: *const CPublishValueIterArray,
    status: *mut CPublishStatus,
) -> *const CPublishValue {
    let result = unsafe { args::borrow(iter, "iter") }
        .map(|iter| iter.items.value().map_or(null(), CPublishValue::from_ref));
    unsafe { report(status, result) }.unwrap_or(null())
}

// Object cursors

/// Releases an object cursor. Null is ignored.
///
/// # Safety
///
/// `iter` must be null or a cursor not yet destroyed.
#[no_mangle]
pub unsafe extern "C" fn cpublish_value_iter_object_destroy(iter: *mut CPublishValueIterObject) {
    if !iter.is_null() {
        drop(unsafe { Box::from_raw(iter) });
    }
}

/// Advances an object cursor. Advancing a finished cursor does nothing.
///
/// # Safety
///
/// `iter` must be null or a live cursor; `status` must be null or initialized.
#[no_mangle]
pub unsafe extern "C" fn cpublish_value_iter_object_next(
    iter: *mut CPublishValueIterObject,
    status: *mut CPublishStatus,
) {
    let result = unsafe { args::borrow_mut(iter, "iter") }.map(|iter| iter.entries.advance());
    unsafe { report(status, result) };
}

/// Returns true once an object cursor has visited every entry.
///
/// # Safety
///
/// See [`cpublish_value_iter_object_next`].
#[no_mangle]
pub unsafe extern "C" fn cpublish_value_iter_object_is_done(
    iter: *const CPublishValueIterObject,
    status: *mut CPublishStatus,
) -> bool {
    let result = unsafe { args::borrow(iter, "iter") }.map(|iter| iter.entries.is_done());
    unsafe { report(status, result) }.unwrap_or(true)
}

/// Borrows the current key, or a null view once done.
///
/// # Safety
///
/// See [`cpublish_value_iter_object_next`].
#[no_mangle]
pub unsafe extern "C" fn cpublish_value_iter_object_key(
    iter: *const CPublishValueIterObject,
    status: *mut CPublishStatus,
) -> CPublishStringView {
    let result = unsafe { args::borrow(iter, "iter") }.map(|iter| {
        iter.entries
            .key()
            .map_or_else(CPublishStringView::null, CPublishStringView::new)
    });
    unsafe { report(status, result) }.unwrap_or_else(CPublishStringView::null)
}

/// Borrows the current value, or null once done.
///
/// # Safety
///
/// See [`cpublish_value_iter_object_next`].
#[no_mangle]
pub unsafe extern "C" fn cpublish_value_iter_object_value(
    iter: *const CPublishValueIterObject,
    status: *mut CPublishStatus,
) -> *const CPublishValue {
    let result = unsafe { args::borrow(iter, "iter") }
        .map(|iter| iter.entries.value().map_or(null(), CPublishValue::from_ref));
    unsafe { report(status, result) }.unwrap_or(null())
}
