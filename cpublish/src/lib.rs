//! C bindings for the publish library.
//!
//! Every handle is an opaque pointer. Handles returned as `*mut` are owned by
//! the caller and have a matching `*_destroy` function; handles returned as
//! `*const` are borrowed from their container.
//!
//! Fallible entry points take a trailing `*mut CPublishStatus`. It must be
//! initialized before the call (see [`cpublish_status_new`]) and receives
//! either Ok or Error with a message. On Error the returned handle is null or
//! zero, but callers should always check the status. Null handle arguments
//! are reported through the status rather than dereferenced.
//!
//! Keys must be valid UTF-8. String values are converted lossily.

#![warn(unsafe_op_in_unsafe_fn, rust_2018_idioms)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate
)]

mod args;
mod context;
mod error;
mod iter;
mod pipeline;
mod runner;
mod status;
mod string;
mod value;

pub use context::{
    cpublish_context_clone, cpublish_context_destroy, cpublish_context_get,
    cpublish_context_is_empty, cpublish_context_iter, cpublish_context_iter_destroy,
    cpublish_context_iter_is_done, cpublish_context_iter_key, cpublish_context_iter_next,
    cpublish_context_iter_value, cpublish_context_len, cpublish_context_new, cpublish_context_set,
    cpublish_context_set_bool, cpublish_context_set_float, cpublish_context_set_int,
    cpublish_context_set_none, cpublish_context_set_string, CPublishContext, CPublishContextIter,
};
pub use error::FfiError;
pub use pipeline::{
    cpublish_publish_default_error_publish, cpublish_publish_default_publish,
    cpublish_publish_default_rollback_publish, cpublish_publish_new_default,
    cpublish_publish_post_publish, cpublish_publish_pre_publish, cpublish_publish_publish,
    cpublish_publish_rollback_post_publish, cpublish_publish_rollback_pre_publish,
    cpublish_publish_rollback_publish, CPublishBasePublish, CPublishRollbackFn, CPublishStageFn,
};
pub use runner::cpublish_run;
pub use status::{
    cpublish_status_destroy, cpublish_status_error, cpublish_status_new, cpublish_status_ok,
    CPublishStatus, CPublishStatusType,
};
pub use string::{cpublish_string_destroy, CPublishString, CPublishStringView};
pub use value::{
    cpublish_value_array_get, cpublish_value_array_iter, cpublish_value_array_len,
    cpublish_value_array_push, cpublish_value_bool, cpublish_value_destroy, cpublish_value_float,
    cpublish_value_int, cpublish_value_iter_array_destroy, cpublish_value_iter_array_is_done,
    cpublish_value_iter_array_next, cpublish_value_iter_array_value,
    cpublish_value_iter_object_destroy, cpublish_value_iter_object_is_done,
    cpublish_value_iter_object_key, cpublish_value_iter_object_next,
    cpublish_value_iter_object_value, cpublish_value_new_array,
    cpublish_value_new_array_with_capacity, cpublish_value_new_bool, cpublish_value_new_float,
    cpublish_value_new_int, cpublish_value_new_none, cpublish_value_new_object,
    cpublish_value_new_object_with_capacity, cpublish_value_new_string, cpublish_value_object_get,
    cpublish_value_object_insert, cpublish_value_object_iter, cpublish_value_object_len,
    cpublish_value_string, cpublish_value_type, CPublishValue, CPublishValueIterArray,
    CPublishValueIterObject, CPublishValueType,
};
