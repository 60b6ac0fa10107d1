//! Strings handed across the boundary.

use std::ffi::{c_char, CStr, CString, NulError};
use std::ptr::{null, null_mut};

/// An owned, NUL-terminated string returned to the caller.
///
/// Release it with [`cpublish_string_destroy`]. Destroying twice is harmless
/// as long as the same record is used, since `destroy_fn` nulls the pointer.
/// Copies of the record must not be destroyed separately.
#[derive(Debug)]
#[repr(C)]
pub struct CPublishString {
    /// The owned text, or null.
    pub string: *mut c_char,
    /// Releases `string` and sets it to null.
    pub destroy_fn: unsafe extern "C" fn(*mut Self),
}

unsafe extern "C" fn destroy_owned(string: *mut CPublishString) {
    if let Some(string) = unsafe { string.as_mut() } {
        if !string.string.is_null() {
            drop(unsafe { CString::from_raw(string.string) });
            string.string = null_mut();
        }
    }
}

impl CPublishString {
    /// Copies `text` into a new owned string.
    pub(crate) fn new(text: &str) -> Result<Self, NulError> {
        Ok(Self {
            string: CString::new(text)?.into_raw(),
            destroy_fn: destroy_owned,
        })
    }

    /// An empty record holding a null pointer.
    pub(crate) fn null() -> Self {
        Self {
            string: null_mut(),
            destroy_fn: destroy_owned,
        }
    }

    /// Returns a copy of the text, if any.
    pub fn to_string_lossy(&self) -> Option<String> {
        if self.string.is_null() {
            return None;
        }
        Some(
            unsafe { CStr::from_ptr(self.string) }
                .to_string_lossy()
                .into_owned(),
        )
    }
}

impl Drop for CPublishString {
    fn drop(&mut self) {
        unsafe { (self.destroy_fn)(self) }
    }
}

/// Releases the text owned by `string`.
///
/// # Safety
///
/// `string` must be null or point to a record returned by this library.
#[no_mangle]
pub unsafe extern "C" fn cpublish_string_destroy(string: *mut CPublishString) {
    if let Some(record) = unsafe { string.as_mut() } {
        unsafe { (record.destroy_fn)(record) }
    }
}

/// A borrowed, NUL-terminated string.
///
/// The text is owned by the iterator it came from and is valid until that
/// iterator is advanced or destroyed.
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct CPublishStringView {
    /// The borrowed text, or null.
    pub string: *const c_char,
}

impl CPublishStringView {
    pub(crate) fn new(text: &CStr) -> Self {
        Self {
            string: text.as_ptr(),
        }
    }

    pub(crate) fn null() -> Self {
        Self { string: null() }
    }

    /// Returns a copy of the text, if any.
    ///
    /// # Safety
    ///
    /// The owner of the text must still be alive.
    pub unsafe fn to_string_lossy(&self) -> Option<String> {
        if self.string.is_null() {
            return None;
        }
        Some(
            unsafe { CStr::from_ptr(self.string) }
                .to_string_lossy()
                .into_owned(),
        )
    }
}
