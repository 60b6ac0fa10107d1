//! The pipeline descriptor.
//!
//! A C pipeline is a [`CPublishBasePublish`]: six function pointers, one per
//! stage and rollback. To carry state, embed the descriptor as the first
//! field of a `repr(C)` struct and cast the `publish` argument back to it
//! inside the callbacks.
//!
//! Forward callbacks return a new owned context, or null with an Ok status to
//! pass their input through unchanged. Returning the `context` argument
//! itself also means unchanged; it is never released. Any other context
//! returned alongside an Error status is released by the library.
//!
//! The invokers reset `status` to Ok before calling the slot, so a callback
//! that succeeds need not touch it.

use crate::args;
use crate::context::CPublishContext;
use crate::error::FfiResult;
use crate::status::{self, report, CPublishStatus};
use publish::context::Context;
use publish::errors::PublishError;
use publish::pipeline::Publish;
use std::ptr::null_mut;

/// Signature of a forward stage callback.
pub type CPublishStageFn = unsafe extern "C" fn(
    publish: *const CPublishBasePublish,
    context: *const CPublishContext,
    status: *mut CPublishStatus,
) -> *mut CPublishContext;

/// Signature of a rollback callback.
pub type CPublishRollbackFn = unsafe extern "C" fn(
    publish: *const CPublishBasePublish,
    context: *const CPublishContext,
    status: *mut CPublishStatus,
);

/// A pipeline defined by C callbacks.
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct CPublishBasePublish {
    /// Runs before the main stage.
    pub pre_publish_fn: CPublishStageFn,
    /// Undoes `pre_publish_fn`.
    pub rollback_pre_publish_fn: CPublishRollbackFn,
    /// The main stage.
    pub publish_fn: CPublishStageFn,
    /// Undoes `publish_fn`.
    pub rollback_publish_fn: CPublishRollbackFn,
    /// Runs after the main stage.
    pub post_publish_fn: CPublishStageFn,
    /// Undoes `post_publish_fn`.
    pub rollback_post_publish_fn: CPublishRollbackFn,
}

impl Default for CPublishBasePublish {
    fn default() -> Self {
        cpublish_publish_new_default()
    }
}

/// Drives a descriptor through the [`Publish`] trait.
///
/// Callbacks receive the original descriptor pointer, so a descriptor
/// embedded in a larger struct can reach its state.
#[derive(Debug)]
pub(crate) struct DescriptorPublish {
    descriptor: *const CPublishBasePublish,
}

impl DescriptorPublish {
    /// # Safety
    ///
    /// `descriptor` must be non-null and outlive the adapter.
    pub(crate) unsafe fn new(descriptor: *const CPublishBasePublish) -> Self {
        Self { descriptor }
    }

    fn slots(&self) -> &CPublishBasePublish {
        unsafe { &*self.descriptor }
    }

    fn forward(&self, stage: CPublishStageFn, context: &Context) -> Result<Context, PublishError> {
        let mut status = CPublishStatus::new_ok();
        let input = CPublishContext::from_ref(context);
        let output = unsafe { stage(self.descriptor, input, &mut status) };
        // the borrowed input handed back means "unchanged", same as null
        let owned = !output.is_null() && !std::ptr::eq(output.cast_const(), input);
        let output = owned.then(|| unsafe { Box::from_raw(output) });

        if status.is_ok() {
            Ok(output.map_or_else(|| context.clone(), |output| (*output).into_context()))
        } else {
            Err(stage_error(&status))
        }
    }

    fn rollback(&self, rollback: CPublishRollbackFn, context: &Context) -> Result<(), PublishError> {
        let mut status = CPublishStatus::new_ok();
        let input = CPublishContext::from_ref(context);
        unsafe { rollback(self.descriptor, input, &mut status) };

        if status.is_ok() {
            Ok(())
        } else {
            Err(stage_error(&status))
        }
    }
}

fn stage_error(status: &CPublishStatus) -> PublishError {
    PublishError::failed(
        status
            .message()
            .unwrap_or_else(|| "stage failed without a message".to_string()),
    )
}

impl Publish for DescriptorPublish {
    fn name(&self) -> &str {
        "CPublishBasePublish"
    }

    fn pre_publish(&self, context: &Context) -> Result<Context, PublishError> {
        self.forward(self.slots().pre_publish_fn, context)
    }

    fn rollback_pre_publish(&self, context: &Context) -> Result<(), PublishError> {
        self.rollback(self.slots().rollback_pre_publish_fn, context)
    }

    fn publish(&self, context: &Context) -> Result<Context, PublishError> {
        self.forward(self.slots().publish_fn, context)
    }

    fn rollback_publish(&self, context: &Context) -> Result<(), PublishError> {
        self.rollback(self.slots().rollback_publish_fn, context)
    }

    fn post_publish(&self, context: &Context) -> Result<Context, PublishError> {
        self.forward(self.slots().post_publish_fn, context)
    }

    fn rollback_post_publish(&self, context: &Context) -> Result<(), PublishError> {
        self.rollback(self.slots().rollback_post_publish_fn, context)
    }
}

/// A bare descriptor can be run from Rust directly.
///
/// Callbacks receive a pointer to this descriptor only, so state embedded
/// around it is not reachable; use [`cpublish_run`](crate::cpublish_run) for
/// stateful descriptors.
impl Publish for CPublishBasePublish {
    fn name(&self) -> &str {
        "CPublishBasePublish"
    }

    fn pre_publish(&self, context: &Context) -> Result<Context, PublishError> {
        unsafe { DescriptorPublish::new(self) }.pre_publish(context)
    }

    fn rollback_pre_publish(&self, context: &Context) -> Result<(), PublishError> {
        unsafe { DescriptorPublish::new(self) }.rollback_pre_publish(context)
    }

    fn publish(&self, context: &Context) -> Result<Context, PublishError> {
        unsafe { DescriptorPublish::new(self) }.publish(context)
    }

    fn rollback_publish(&self, context: &Context) -> Result<(), PublishError> {
        unsafe { DescriptorPublish::new(self) }.rollback_publish(context)
    }

    fn post_publish(&self, context: &Context) -> Result<Context, PublishError> {
        unsafe { DescriptorPublish::new(self) }.post_publish(context)
    }

    fn rollback_post_publish(&self, context: &Context) -> Result<(), PublishError> {
        unsafe { DescriptorPublish::new(self) }.rollback_post_publish(context)
    }
}

unsafe fn check_stage_args(
    publish: *const CPublishBasePublish,
    context: *const CPublishContext,
) -> FfiResult<()> {
    unsafe { args::borrow(publish, "publish") }?;
    unsafe { args::borrow(context, "context") }?;
    Ok(())
}

// Defaults

/// Default forward stage: passes its input through unchanged.
///
/// # Safety
///
/// `publish` and `context` must be null or live; `status` must be null or
/// initialized.
#[no_mangle]
pub unsafe extern "C" fn cpublish_publish_default_publish(
    publish: *const CPublishBasePublish,
    context: *const CPublishContext,
    status: *mut CPublishStatus,
) -> *mut CPublishContext {
    unsafe { report(status, check_stage_args(publish, context)) };
    null_mut()
}

/// Default main stage: always fails.
///
/// # Safety
///
/// `status` must be null or initialized.
#[no_mangle]
pub unsafe extern "C" fn cpublish_publish_default_error_publish(
    _publish: *const CPublishBasePublish,
    _context: *const CPublishContext,
    status: *mut CPublishStatus,
) -> *mut CPublishContext {
    let message = PublishError::MissingPublishStage.to_string();
    unsafe { status::set(status, CPublishStatus::new_error(message)) };
    null_mut()
}

/// Default rollback: does nothing.
///
/// # Safety
///
/// See [`cpublish_publish_default_publish`].
#[no_mangle]
pub unsafe extern "C" fn cpublish_publish_default_rollback_publish(
    publish: *const CPublishBasePublish,
    context: *const CPublishContext,
    status: *mut CPublishStatus,
) {
    unsafe { report(status, check_stage_args(publish, context)) };
}

/// Returns a descriptor made of the default stages.
#[no_mangle]
pub extern "C" fn cpublish_publish_new_default() -> CPublishBasePublish {
    CPublishBasePublish {
        pre_publish_fn: cpublish_publish_default_publish,
        rollback_pre_publish_fn: cpublish_publish_default_rollback_publish,
        publish_fn: cpublish_publish_default_error_publish,
        rollback_publish_fn: cpublish_publish_default_rollback_publish,
        post_publish_fn: cpublish_publish_default_publish,
        rollback_post_publish_fn: cpublish_publish_default_rollback_publish,
    }
}

// Invokers

unsafe fn invoke_stage(
    publish: *const CPublishBasePublish,
    context: *const CPublishContext,
    status: *mut CPublishStatus,
    slot: fn(&CPublishBasePublish) -> CPublishStageFn,
) -> *mut CPublishContext {
    unsafe { status::set(status, CPublishStatus::new_ok()) };
    match unsafe { args::borrow(publish, "publish") } {
        Ok(descriptor) => unsafe { slot(descriptor)(publish, context, status) },
        Err(err) => {
            unsafe { report::<()>(status, Err(err)) };
            null_mut()
        }
    }
}

unsafe fn invoke_rollback(
    publish: *const CPublishBasePublish,
    context: *const CPublishContext,
    status: *mut CPublishStatus,
    slot: fn(&CPublishBasePublish) -> CPublishRollbackFn,
) {
    unsafe { status::set(status, CPublishStatus::new_ok()) };
    match unsafe { args::borrow(publish, "publish") } {
        Ok(descriptor) => unsafe { slot(descriptor)(publish, context, status) },
        Err(err) => {
            unsafe { report::<()>(status, Err(err)) };
        }
    }
}

/// Calls the descriptor's pre-publish stage.
///
/// # Safety
///
/// `publish` must be null or a live descriptor; the callback's own
/// requirements on `context` and `status` apply.
#[no_mangle]
pub unsafe extern "C" fn cpublish_publish_pre_publish(
    publish: *const CPublishBasePublish,
    context: *const CPublishContext,
    status: *mut CPublishStatus,
) -> *mut CPublishContext {
    unsafe { invoke_stage(publish, context, status, |d| d.pre_publish_fn) }
}

/// Calls the descriptor's pre-publish rollback.
///
/// # Safety
///
/// See [`cpublish_publish_pre_publish`].
#[no_mangle]
pub unsafe extern "C" fn cpublish_publish_rollback_pre_publish(
    publish: *const CPublishBasePublish,
    context: *const CPublishContext,
    status: *mut CPublishStatus,
) {
    unsafe { invoke_rollback(publish, context, status, |d| d.rollback_pre_publish_fn) };
}

/// Calls the descriptor's main stage.
///
/// # Safety
///
/// See [`cpublish_publish_pre_publish`].
#[no_mangle]
pub unsafe extern "C" fn cpublish_publish_publish(
    publish: *const CPublishBasePublish,
    context: *const CPublishContext,
    status: *mut CPublishStatus,
) -> *mut CPublishContext {
    unsafe { invoke_stage(publish, context, status, |d| d.publish_fn) }
}

/// Calls the descriptor's main stage rollback.
///
/// # Safety
///
/// See [`cpublish_publish_pre_publish`].
#[no_mangle]
pub unsafe extern "C" fn cpublish_publish_rollback_publish(
    publish: *const CPublishBasePublish,
    context: *const CPublishContext,
    status: *mut CPublishStatus,
) {
    unsafe { invoke_rollback(publish, context, status, |d| d.rollback_publish_fn) };
}

/// Calls the descriptor's post-publish stage.
///
/// # Safety
///
/// See [`cpublish_publish_pre_publish`].
#[no_mangle]
pub unsafe extern "C" fn cpublish_publish_post_publish(
    publish: *const CPublishBasePublish,
    context: *const CPublishContext,
    status: *mut CPublishStatus,
) -> *mut CPublishContext {
    unsafe { invoke_stage(publish, context, status, |d| d.post_publish_fn) }
}

/// Calls the descriptor's post-publish rollback.
///
/// # Safety
///
/// See [`cpublish_publish_pre_publish`].
#[no_mangle]
pub unsafe extern "C" fn cpublish_publish_rollback_post_publish(
    publish: *const CPublishBasePublish,
    context: *const CPublishContext,
    status: *mut CPublishStatus,
) {
    unsafe { invoke_rollback(publish, context, status, |d| d.rollback_post_publish_fn) };
}
