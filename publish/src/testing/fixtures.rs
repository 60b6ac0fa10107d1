//! Test fixtures for pipeline testing.

use crate::context::Context;
use crate::core::PublishStage;
use crate::errors::PublishError;
use crate::pipeline::Publish;

/// A configurable pipeline for exercising the runner.
///
/// Each forward stage copies its input and adds the key `"<stage>"` with the
/// value `"done"`. Stages and rollbacks can be told to fail instead.
#[derive(Debug, Clone, Default)]
pub struct TestPipeline {
    name: String,
    failing_stage: Option<PublishStage>,
    failing_rollbacks: Vec<PublishStage>,
}

impl TestPipeline {
    /// Creates a pipeline whose stages all succeed.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Makes `stage` fail with `"<stage> failed"`.
    #[must_use]
    pub fn failing_at(mut self, stage: PublishStage) -> Self {
        self.failing_stage = Some(stage);
        self
    }

    /// Makes the rollback of `stage` fail with `"<stage> rollback failed"`.
    #[must_use]
    pub fn with_failing_rollback(mut self, stage: PublishStage) -> Self {
        self.failing_rollbacks.push(stage);
        self
    }

    fn forward(&self, stage: PublishStage, context: &Context) -> Result<Context, PublishError> {
        if self.failing_stage == Some(stage) {
            return Err(PublishError::failed(format!("{stage} failed")));
        }
        let mut next = context.clone();
        next.set_string(stage.to_string(), "done");
        Ok(next)
    }

    fn rollback(&self, stage: PublishStage) -> Result<(), PublishError> {
        if self.failing_rollbacks.contains(&stage) {
            return Err(PublishError::failed(format!("{stage} rollback failed")));
        }
        Ok(())
    }
}

impl Publish for TestPipeline {
    fn name(&self) -> &str {
        &self.name
    }

    fn pre_publish(&self, context: &Context) -> Result<Context, PublishError> {
        self.forward(PublishStage::PrePublish, context)
    }

    fn rollback_pre_publish(&self, _context: &Context) -> Result<(), PublishError> {
        self.rollback(PublishStage::PrePublish)
    }

    fn publish(&self, context: &Context) -> Result<Context, PublishError> {
        self.forward(PublishStage::Publish, context)
    }

    fn rollback_publish(&self, _context: &Context) -> Result<(), PublishError> {
        self.rollback(PublishStage::Publish)
    }

    fn post_publish(&self, context: &Context) -> Result<Context, PublishError> {
        self.forward(PublishStage::PostPublish, context)
    }

    fn rollback_post_publish(&self, _context: &Context) -> Result<(), PublishError> {
        self.rollback(PublishStage::PostPublish)
    }
}

/// Builds a context from string pairs.
#[must_use]
pub fn context_of(entries: &[(&str, &str)]) -> Context {
    let mut context = Context::with_capacity(entries.len());
    for (key, value) in entries {
        context.set_string(*key, value);
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_stamps_stage_keys() {
        let pipeline = TestPipeline::new("fixture");
        let ctx = pipeline.pre_publish(&Context::new()).unwrap();
        assert!(ctx.contains_key("pre_publish"));
    }

    #[test]
    fn test_pipeline_failures() {
        let pipeline = TestPipeline::new("fixture")
            .failing_at(PublishStage::Publish)
            .with_failing_rollback(PublishStage::PrePublish);

        let err = pipeline.publish(&Context::new()).unwrap_err();
        assert_eq!(err.to_string(), "publish failed");
        assert!(pipeline.rollback_pre_publish(&Context::new()).is_err());
        assert!(pipeline.rollback_publish(&Context::new()).is_ok());
    }

    #[test]
    fn test_context_of() {
        let ctx = context_of(&[("a", "1"), ("b", "2")]);
        assert_eq!(ctx.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
