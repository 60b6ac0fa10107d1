//! The status out-channel.

use crate::error::FfiResult;
use std::ffi::{c_char, CStr, CString};
use std::ptr::null_mut;

/// Outcome discriminant of a [`CPublishStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub enum CPublishStatusType {
    /// The call succeeded.
    CPublishStatusTypeOk,
    /// The call failed; `message` says why.
    CPublishStatusTypeError,
}

/// Caller-owned record every fallible entry point writes its outcome to.
///
/// A status must be initialized (for example with [`cpublish_status_new`])
/// before it is handed to any entry point. Writing a new outcome releases the
/// previous message, so one record can be reused across calls.
#[derive(Debug)]
#[repr(C)]
pub struct CPublishStatus {
    /// Whether the last call succeeded.
    pub status: CPublishStatusType,
    /// Owned error message, or null on success.
    pub message: *mut c_char,
}

impl CPublishStatus {
    /// Creates an Ok status.
    pub fn new_ok() -> Self {
        Self {
            status: CPublishStatusType::CPublishStatusTypeOk,
            message: null_mut(),
        }
    }

    /// Creates an Error status. NUL bytes in `message` are dropped.
    pub fn new_error(message: impl AsRef<str>) -> Self {
        let bytes: Vec<u8> = message.as_ref().bytes().filter(|b| *b != 0).collect();
        Self {
            status: CPublishStatusType::CPublishStatusTypeError,
            message: CString::new(bytes).unwrap_or_default().into_raw(),
        }
    }

    /// Returns true if the status is Ok.
    pub fn is_ok(&self) -> bool {
        self.status == CPublishStatusType::CPublishStatusTypeOk
    }

    /// Returns a copy of the error message, if any.
    pub fn message(&self) -> Option<String> {
        if self.message.is_null() {
            return None;
        }
        Some(
            unsafe { CStr::from_ptr(self.message) }
                .to_string_lossy()
                .into_owned(),
        )
    }
}

impl Default for CPublishStatus {
    fn default() -> Self {
        Self::new_ok()
    }
}

impl Drop for CPublishStatus {
    fn drop(&mut self) {
        if !self.message.is_null() {
            drop(unsafe { CString::from_raw(self.message) });
            self.message = null_mut();
        }
    }
}

/// Overwrites `*status`, releasing its old message. A null `status` is ignored.
///
/// # Safety
///
/// A non-null `status` must point to an initialized record.
pub(crate) unsafe fn set(status: *mut CPublishStatus, value: CPublishStatus) {
    if let Some(status) = unsafe { status.as_mut() } {
        *status = value;
    }
}

/// Writes the outcome of `result` to `status` and returns the success value.
///
/// # Safety
///
/// See [`set`].
pub(crate) unsafe fn report<T>(status: *mut CPublishStatus, result: FfiResult<T>) -> Option<T> {
    match result {
        Ok(value) => {
            unsafe { set(status, CPublishStatus::new_ok()) };
            Some(value)
        }
        Err(err) => {
            tracing::debug!(error = %err, "cpublish call failed");
            unsafe { set(status, CPublishStatus::new_error(err.to_string())) };
            None
        }
    }
}

/// Returns a new Ok status.
#[no_mangle]
pub extern "C" fn cpublish_status_new() -> CPublishStatus {
    CPublishStatus::new_ok()
}

/// Sets `status` to Ok.
///
/// # Safety
///
/// `status` must be null or point to an initialized record.
#[no_mangle]
pub unsafe extern "C" fn cpublish_status_ok(status: *mut CPublishStatus) {
    unsafe { set(status, CPublishStatus::new_ok()) };
}

/// Sets `status` to Error with a copy of `message`.
///
/// A null `message` is reported as `"unknown error"`.
///
/// # Safety
///
/// `status` must be null or point to an initialized record, and a non-null
/// `message` must be NUL-terminated.
#[no_mangle]
pub unsafe extern "C" fn cpublish_status_error(status: *mut CPublishStatus, message: *const c_char) {
    let message = if message.is_null() {
        "unknown error".into()
    } else {
        unsafe { CStr::from_ptr(message) }.to_string_lossy()
    };
    unsafe { set(status, CPublishStatus::new_error(message)) };
}

/// Releases the message held by `status` and resets it to Ok.
///
/// Calling this more than once is harmless.
///
/// # Safety
///
/// `status` must be null or point to an initialized record.
#[no_mangle]
pub unsafe extern "C" fn cpublish_status_destroy(status: *mut CPublishStatus) {
    unsafe { set(status, CPublishStatus::new_ok()) };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FfiError;

    #[test]
    fn test_new_error_strips_nul() {
        let status = CPublishStatus::new_error("bad\0key");
        assert!(!status.is_ok());
        assert_eq!(status.message().as_deref(), Some("badkey"));
    }

    #[test]
    fn test_report() {
        let mut status = CPublishStatus::new_ok();

        let value = unsafe { report(&mut status, Err::<u8, _>(FfiError::NullArgument("x"))) };
        assert!(value.is_none());
        assert_eq!(status.message().as_deref(), Some("x is null"));

        let value = unsafe { report(&mut status, Ok(3_u8)) };
        assert_eq!(value, Some(3));
        assert!(status.is_ok());
        assert!(status.message.is_null());
    }

    #[test]
    fn test_report_to_null_status() {
        let value = unsafe { report::<u8>(null_mut(), Err(FfiError::InvalidKey)) };
        assert!(value.is_none());
    }
}
