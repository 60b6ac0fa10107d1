//! A closure-based pipeline.

use super::{Publish, defaults};
use crate::context::Context;
use crate::errors::PublishError;
use std::fmt::Debug;

type StageFn = Box<dyn Fn(&Context) -> Result<Context, PublishError> + Send + Sync>;
type RollbackFn = Box<dyn Fn(&Context) -> Result<(), PublishError> + Send + Sync>;

/// A pipeline assembled from closures.
///
/// Any stage left unset falls back to the matching default in
/// [`defaults`](super::defaults), so a pipeline without a main stage fails
/// just like one built on the bare [`Publish`] trait.
///
/// ```
/// use publish::prelude::*;
///
/// let pipeline = FnPublish::new("tag")
///     .with_publish(|ctx| {
///         let mut next = ctx.clone();
///         next.set_string("tag", "v2");
///         Ok(next)
///     });
///
/// let context = publish::run(&pipeline).unwrap();
/// assert!(context.contains_key("tag"));
/// ```
pub struct FnPublish {
    name: String,
    pre_publish: Option<StageFn>,
    rollback_pre_publish: Option<RollbackFn>,
    publish: Option<StageFn>,
    rollback_publish: Option<RollbackFn>,
    post_publish: Option<StageFn>,
    rollback_post_publish: Option<RollbackFn>,
}

impl FnPublish {
    /// Creates a pipeline with every stage at its default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pre_publish: None,
            rollback_pre_publish: None,
            publish: None,
            rollback_publish: None,
            post_publish: None,
            rollback_post_publish: None,
        }
    }

    /// Sets the pre-publish stage.
    #[must_use]
    pub fn with_pre_publish<F>(mut self, f: F) -> Self
    where
        F: Fn(&Context) -> Result<Context, PublishError> + Send + Sync + 'static,
    {
        self.pre_publish = Some(Box::new(f));
        self
    }

    /// Sets the pre-publish rollback.
    #[must_use]
    pub fn with_rollback_pre_publish<F>(mut self, f: F) -> Self
    where
        F: Fn(&Context) -> Result<(), PublishError> + Send + Sync + 'static,
    {
        self.rollback_pre_publish = Some(Box::new(f));
        self
    }

    /// Sets the main stage.
    #[must_use]
    pub fn with_publish<F>(mut self, f: F) -> Self
    where
        F: Fn(&Context) -> Result<Context, PublishError> + Send + Sync + 'static,
    {
        self.publish = Some(Box::new(f));
        self
    }

    /// Sets the main stage rollback.
    #[must_use]
    pub fn with_rollback_publish<F>(mut self, f: F) -> Self
    where
        F: Fn(&Context) -> Result<(), PublishError> + Send + Sync + 'static,
    {
        self.rollback_publish = Some(Box::new(f));
        self
    }

    /// Sets the post-publish stage.
    #[must_use]
    pub fn with_post_publish<F>(mut self, f: F) -> Self
    where
        F: Fn(&Context) -> Result<Context, PublishError> + Send + Sync + 'static,
    {
        self.post_publish = Some(Box::new(f));
        self
    }

    /// Sets the post-publish rollback.
    #[must_use]
    pub fn with_rollback_post_publish<F>(mut self, f: F) -> Self
    where
        F: Fn(&Context) -> Result<(), PublishError> + Send + Sync + 'static,
    {
        self.rollback_post_publish = Some(Box::new(f));
        self
    }
}

impl Debug for FnPublish {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnPublish")
            .field("name", &self.name)
            .field("pre_publish", &self.pre_publish.is_some())
            .field("publish", &self.publish.is_some())
            .field("post_publish", &self.post_publish.is_some())
            .finish_non_exhaustive()
    }
}

fn stage(
    f: Option<&StageFn>,
    context: &Context,
    default: fn(&Context) -> Result<Context, PublishError>,
) -> Result<Context, PublishError> {
    f.map_or_else(|| default(context), |f| f(context))
}

fn rollback(f: Option<&RollbackFn>, context: &Context) -> Result<(), PublishError> {
    f.map_or_else(|| defaults::no_op_rollback(context), |f| f(context))
}

impl Publish for FnPublish {
    fn name(&self) -> &str {
        &self.name
    }

    fn pre_publish(&self, context: &Context) -> Result<Context, PublishError> {
        stage(self.pre_publish.as_ref(), context, defaults::identity)
    }

    fn rollback_pre_publish(&self, context: &Context) -> Result<(), PublishError> {
        rollback(self.rollback_pre_publish.as_ref(), context)
    }

    fn publish(&self, context: &Context) -> Result<Context, PublishError> {
        stage(self.publish.as_ref(), context, defaults::missing_publish)
    }

    fn rollback_publish(&self, context: &Context) -> Result<(), PublishError> {
        rollback(self.rollback_publish.as_ref(), context)
    }

    fn post_publish(&self, context: &Context) -> Result<Context, PublishError> {
        stage(self.post_publish.as_ref(), context, defaults::identity)
    }

    fn rollback_post_publish(&self, context: &Context) -> Result<(), PublishError> {
        rollback(self.rollback_post_publish.as_ref(), context)
    }
}
