//! Running a descriptor.

use crate::context::CPublishContext;
use crate::error::{FfiError, FfiResult};
use crate::pipeline::{CPublishBasePublish, DescriptorPublish};
use crate::status::{report, CPublishStatus};
use publish::context::Context;
use std::ptr::null_mut;

unsafe fn run_descriptor(publish: *const CPublishBasePublish) -> FfiResult<Context> {
    if publish.is_null() {
        return Err(FfiError::NullArgument("publish"));
    }
    let pipeline = unsafe { DescriptorPublish::new(publish) };
    Ok(::publish::run(&pipeline)?)
}

/// Runs a pipeline from an empty context.
///
/// On success returns the final context, which the caller owns. On failure
/// returns null and sets `status` to an Error naming the failed stage, its
/// cause and any rollback failures.
///
/// # Safety
///
/// `publish` must be null or a live descriptor whose callbacks uphold the
/// stage contract; `status` must be null or initialized.
#[no_mangle]
pub unsafe extern "C" fn cpublish_run(
    publish: *const CPublishBasePublish,
    status: *mut CPublishStatus,
) -> *mut CPublishContext {
    let result = unsafe { run_descriptor(publish) };
    unsafe { report(status, result) }.map_or(null_mut(), CPublishContext::boxed)
}
