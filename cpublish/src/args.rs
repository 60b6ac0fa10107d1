//! Argument checks shared by the entry points.

use crate::error::{FfiError, FfiResult};
use std::ffi::{c_char, CStr};

/// Borrows `ptr`, failing if it is null.
///
/// # Safety
///
/// A non-null `ptr` must point to a live `T` for `'a`.
pub(crate) unsafe fn borrow<'a, T>(ptr: *const T, name: &'static str) -> FfiResult<&'a T> {
    unsafe { ptr.as_ref() }.ok_or(FfiError::NullArgument(name))
}

/// Mutably borrows `ptr`, failing if it is null.
///
/// # Safety
///
/// A non-null `ptr` must point to a live `T` for `'a` with no other borrows.
pub(crate) unsafe fn borrow_mut<'a, T>(ptr: *mut T, name: &'static str) -> FfiResult<&'a mut T> {
    unsafe { ptr.as_mut() }.ok_or(FfiError::NullArgument(name))
}

/// Reads a key. Keys must be valid UTF-8.
///
/// # Safety
///
/// A non-null `ptr` must point to a NUL-terminated string that lives for `'a`.
pub(crate) unsafe fn key<'a>(ptr: *const c_char) -> FfiResult<&'a str> {
    if ptr.is_null() {
        return Err(FfiError::NullArgument("key"));
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map_err(|_| FfiError::InvalidKey)
}

/// Reads a string value, replacing invalid UTF-8.
///
/// # Safety
///
/// A non-null `ptr` must point to a NUL-terminated string.
pub(crate) unsafe fn text(ptr: *const c_char, name: &'static str) -> FfiResult<String> {
    if ptr.is_null() {
        return Err(FfiError::NullArgument(name));
    }
    Ok(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
}
