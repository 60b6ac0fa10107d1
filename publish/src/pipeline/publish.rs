//! The publish capability trait.

use super::defaults;
use crate::context::Context;
use crate::errors::PublishError;

/// A publish pipeline: three forward stages, each paired with a rollback.
///
/// Forward stages take the previous stage's output by reference and return a
/// new [`Context`]; they must not rely on mutating their input. Rollbacks are
/// compensating actions run in reverse order when a stage fails, and receive
/// the same context their forward stage was given.
///
/// Only [`Publish::publish`] must be provided. The other stages default to
/// the identity transform and every rollback defaults to a no-op; see
/// [`defaults`] for delegating to them from custom implementations.
///
/// # Example
///
/// ```
/// use publish::prelude::*;
///
/// struct Release;
///
/// impl Publish for Release {
///     fn publish(&self, context: &Context) -> Result<Context, PublishError> {
///         let mut next = context.clone();
///         next.set_string("released", "v1.0.0");
///         Ok(next)
///     }
/// }
///
/// let context = publish::run(&Release).unwrap();
/// assert_eq!(context.get("released"), Some(&Value::from("v1.0.0")));
/// ```
pub trait Publish {
    /// Returns a name for logs and run reports.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Runs before the main stage.
    fn pre_publish(&self, context: &Context) -> Result<Context, PublishError> {
        defaults::identity(context)
    }

    /// Undoes the effects of [`Publish::pre_publish`].
    fn rollback_pre_publish(&self, context: &Context) -> Result<(), PublishError> {
        defaults::no_op_rollback(context)
    }

    /// The main stage. The default always fails.
    fn publish(&self, context: &Context) -> Result<Context, PublishError> {
        defaults::missing_publish(context)
    }

    /// Undoes the effects of [`Publish::publish`].
    fn rollback_publish(&self, context: &Context) -> Result<(), PublishError> {
        defaults::no_op_rollback(context)
    }

    /// Runs after the main stage.
    fn post_publish(&self, context: &Context) -> Result<Context, PublishError> {
        defaults::identity(context)
    }

    /// Undoes the effects of [`Publish::post_publish`].
    fn rollback_post_publish(&self, context: &Context) -> Result<(), PublishError> {
        defaults::no_op_rollback(context)
    }
}

impl<P: Publish + ?Sized> Publish for &P {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn pre_publish(&self, context: &Context) -> Result<Context, PublishError> {
        (**self).pre_publish(context)
    }

    fn rollback_pre_publish(&self, context: &Context) -> Result<(), PublishError> {
        (**self).rollback_pre_publish(context)
    }

    fn publish(&self, context: &Context) -> Result<Context, PublishError> {
        (**self).publish(context)
    }

    fn rollback_publish(&self, context: &Context) -> Result<(), PublishError> {
        (**self).rollback_publish(context)
    }

    fn post_publish(&self, context: &Context) -> Result<Context, PublishError> {
        (**self).post_publish(context)
    }

    fn rollback_post_publish(&self, context: &Context) -> Result<(), PublishError> {
        (**self).rollback_post_publish(context)
    }
}

/// A pipeline made only of the default stages.
///
/// Its main stage always fails, so running it exercises the rollback of
/// `pre_publish`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPublish;

impl Publish for DefaultPublish {}
