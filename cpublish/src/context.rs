//! Context handles.

use crate::args;
use crate::error::FfiResult;
use crate::iter::EntrySnapshot;
use crate::status::{report, CPublishStatus};
use crate::string::CPublishStringView;
use crate::value::CPublishValue;
use publish::context::Context;
use publish::value::Value;
use std::ffi::c_char;
use std::ptr::{null, null_mut};

/// A handle to a [`Context`].
///
/// Owned handles are released with [`cpublish_context_destroy`]. The context
/// handed to a stage callback is borrowed and must not be destroyed.
#[derive(Debug, Clone, Default, PartialEq)]
#[repr(transparent)]
pub struct CPublishContext {
    inner: Context,
}

impl CPublishContext {
    /// Borrows the wrapped context.
    pub fn context(&self) -> &Context {
        &self.inner
    }

    /// Unwraps the context.
    pub fn into_context(self) -> Context {
        self.inner
    }

    /// Views a borrowed context as a handle.
    pub(crate) fn from_ref(context: &Context) -> *const Self {
        (context as *const Context).cast::<Self>()
    }

    pub(crate) fn boxed(inner: Context) -> *mut Self {
        Box::into_raw(Box::new(Self { inner }))
    }
}

impl From<Context> for CPublishContext {
    fn from(inner: Context) -> Self {
        Self { inner }
    }
}

/// Snapshot cursor over a context.
#[derive(Debug)]
pub struct CPublishContextIter {
    entries: EntrySnapshot,
}

unsafe fn context_ref<'a>(context: *const CPublishContext) -> FfiResult<&'a Context> {
    unsafe { args::borrow(context, "context") }.map(CPublishContext::context)
}

/// Inserts `value` under `key` after checking both pointers.
unsafe fn insert(
    context: *mut CPublishContext,
    key: *const c_char,
    value: Value,
    status: *mut CPublishStatus,
) {
    let result = unsafe { args::key(key) }.and_then(|key| {
        let context = unsafe { args::borrow_mut(context, "context") }?;
        context.inner.insert(key, value);
        Ok(())
    });
    unsafe { report(status, result) };
}

/// Creates an empty context.
#[no_mangle]
pub extern "C" fn cpublish_context_new() -> *mut CPublishContext {
    CPublishContext::boxed(Context::new())
}

/// Returns an independent deep copy of `context`.
///
/// # Safety
///
/// `context` must be null or a live handle; `status` must be null or
/// initialized.
#[no_mangle]
pub unsafe extern "C" fn cpublish_context_clone(
    context: *const CPublishContext,
    status: *mut CPublishStatus,
) -> *mut CPublishContext {
    let result =
        unsafe { context_ref(context) }.map(|context| CPublishContext::boxed(context.clone()));
    unsafe { report(status, result) }.unwrap_or(null_mut())
}

/// Releases an owned context. Null is ignored.
///
/// # Safety
///
/// `context` must be null or an owned handle not yet destroyed.
#[no_mangle]
pub unsafe extern "C" fn cpublish_context_destroy(context: *mut CPublishContext) {
    if !context.is_null() {
        drop(unsafe { Box::from_raw(context) });
    }
}

/// Borrows the value under `key`. An absent key yields null with an Ok status.
///
/// # Safety
///
/// `context` must be null or a live handle, a non-null `key` must be
/// NUL-terminated, and `status` must be null or initialized.
#[no_mangle]
pub unsafe extern "C" fn cpublish_context_get(
    context: *const CPublishContext,
    key: *const c_char,
    status: *mut CPublishStatus,
) -> *const CPublishValue {
    let result = unsafe { context_ref(context) }.and_then(|context| {
        let key = unsafe { args::key(key) }?;
        Ok(context.get(key).map_or(null(), CPublishValue::from_ref))
    });
    unsafe { report(status, result) }.unwrap_or(null())
}

/// Stores a deep copy of `value` under `key`. The caller keeps `value`.
///
/// # Safety
///
/// As for [`cpublish_context_get`]; `value` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn cpublish_context_set(
    context: *mut CPublishContext,
    key: *const c_char,
    value: *const CPublishValue,
    status: *mut CPublishStatus,
) {
    match unsafe { args::borrow(value, "value") } {
        Ok(value) => unsafe { insert(context, key, value.value().clone(), status) },
        Err(err) => {
            unsafe { report::<()>(status, Err(err)) };
        }
    }
}

/// Stores none under `key`.
///
/// # Safety
///
/// As for [`cpublish_context_get`].
#[no_mangle]
pub unsafe extern "C" fn cpublish_context_set_none(
    context: *mut CPublishContext,
    key: *const c_char,
    status: *mut CPublishStatus,
) {
    unsafe { insert(context, key, Value::None, status) };
}

/// Stores a boolean under `key`.
///
/// # Safety
///
/// As for [`cpublish_context_get`].
#[no_mangle]
pub unsafe extern "C" fn cpublish_context_set_bool(
    context: *mut CPublishContext,
    key: *const c_char,
    value: bool,
    status: *mut CPublishStatus,
) {
    unsafe { insert(context, key, Value::Boolean(value), status) };
}

/// Stores an integer under `key`.
///
/// # Safety
///
/// As for [`cpublish_context_get`].
#[no_mangle]
pub unsafe extern "C" fn cpublish_context_set_int(
    context: *mut CPublishContext,
    key: *const c_char,
    value: i64,
    status: *mut CPublishStatus,
) {
    unsafe { insert(context, key, Value::Integer(value), status) };
}

/// Stores a float under `key`.
///
/// # Safety
///
/// As for [`cpublish_context_get`].
#[no_mangle]
pub unsafe extern "C" fn cpublish_context_set_float(
    context: *mut CPublishContext,
    key: *const c_char,
    value: f64,
    status: *mut CPublishStatus,
) {
    unsafe { insert(context, key, Value::Float(value), status) };
}

/// Stores a copy of the string `value` under `key`. Invalid UTF-8 is replaced.
///
/// # Safety
///
/// As for [`cpublish_context_get`]; a non-null `value` must be NUL-terminated.
#[no_mangle]
pub unsafe extern "C" fn cpublish_context_set_string(
    context: *mut CPublishContext,
    key: *const c_char,
    value: *const c_char,
    status: *mut CPublishStatus,
) {
    match unsafe { args::text(value, "value") } {
        Ok(text) => unsafe { insert(context, key, Value::String(text), status) },
        Err(err) => {
            unsafe { report::<()>(status, Err(err)) };
        }
    }
}

/// Returns the number of entries.
///
/// # Safety
///
/// `context` must be null or a live handle; `status` must be null or
/// initialized.
#[no_mangle]
pub unsafe extern "C" fn cpublish_context_len(
    context: *const CPublishContext,
    status: *mut CPublishStatus,
) -> usize {
    let result = unsafe { context_ref(context) }.map(Context::len);
    unsafe { report(status, result) }.unwrap_or_default()
}

/// Returns true if the context has no entries.
///
/// # Safety
///
/// See [`cpublish_context_len`].
#[no_mangle]
pub unsafe extern "C" fn cpublish_context_is_empty(
    context: *const CPublishContext,
    status: *mut CPublishStatus,
) -> bool {
    let result = unsafe { context_ref(context) }.map(Context::is_empty);
    unsafe { report(status, result) }.unwrap_or(true)
}

/// Creates a snapshot cursor over the entries.
///
/// Release it with [`cpublish_context_iter_destroy`].
///
/// # Safety
///
/// See [`cpublish_context_len`].
#[no_mangle]
pub unsafe extern "C" fn cpublish_context_iter(
    context: *const CPublishContext,
    status: *mut CPublishStatus,
) -> *mut CPublishContextIter {
    let result = unsafe { context_ref(context) }.and_then(|context| {
        let entries = EntrySnapshot::new(context)?;
        Ok(Box::into_raw(Box::new(CPublishContextIter { entries })))
    });
    unsafe { report(status, result) }.unwrap_or(null_mut())
}

/// Releases a context cursor. Null is ignored.
///
/// # Safety
///
/// `iter` must be null or a cursor not yet destroyed.
#[no_mangle]
pub unsafe extern "C" fn cpublish_context_iter_destroy(iter: *mut CPublishContextIter) {
    if !iter.is_null() {
        drop(unsafe { Box::from_raw(iter) });
    }
}

/// Advances a context cursor. Advancing a finished cursor does nothing.
///
/// # Safety
///
/// `iter` must be null or a live cursor; `status` must be null or initialized.
#[no_mangle]
pub unsafe extern "C" fn cpublish_context_iter_next(
    iter: *mut CPublishContextIter,
    status: *mut CPublishStatus,
) {
    let result = unsafe { args::borrow_mut(iter, "iter") }.map(|iter| iter.entries.advance());
    unsafe { report(status, result) };
}

/// Returns true once the cursor has visited every entry.
///
/// # Safety
///
/// See [`cpublish_context_iter_next`].
#[no_mangle]
pub unsafe extern "C" fn cpublish_context_iter_is_done(
    iter: *const CPublishContextIter,
    status: *mut CPublishStatus,
) -> bool {
    let result = unsafe { args::borrow(iter, "iter") }.map(|iter| iter.entries.is_done());
    unsafe { report(status, result) }.unwrap_or(true)
}

/// Borrows the current key, or a null view once done.
///
/// # Safety
///
/// See [`cpublish_context_iter_next`].
#[no_mangle]
pub unsafe extern "C" fn cpublish_context_iter_key(
    iter: *const CPublishContextIter,
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
/// See [`cpublish_context_iter_next`].
#[no_mangle]
pub unsafe extern "C" fn cpublish_context_iter_value(
    iter: *const CPublishContextIter,
    status: *mut CPublishStatus,
) -> *const CPublishValue {
    let result = unsafe { args::borrow(iter, "iter") }
        .map(|iter| iter.entries.value().map_or(null(), CPublishValue::from_ref));
    unsafe { report(status, result) }.unwrap_or(null())
}
