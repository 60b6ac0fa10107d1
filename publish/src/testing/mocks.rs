//! Recording wrappers for testing.

use parking_lot::Mutex;

use crate::context::Context;
use crate::core::PublishStage;
use crate::errors::PublishError;
use crate::pipeline::Publish;

/// One call made on a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublishCall {
    /// A forward stage ran.
    Forward(PublishStage),
    /// A rollback ran.
    Rollback(PublishStage),
}

/// Wraps a pipeline and records every stage call with its input context.
#[derive(Debug)]
pub struct RecordingPublish<P> {
    inner: P,
    records: Mutex<Vec<(PublishCall, Context)>>,
}

impl<P: Publish> RecordingPublish<P> {
    /// Wraps `inner`.
    #[must_use]
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            records: Mutex::new(Vec::new()),
        }
    }

    /// Returns the calls made so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<PublishCall> {
        self.records.lock().iter().map(|(call, _)| *call).collect()
    }

    /// Returns the number of calls made so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.records.lock().len()
    }

    /// Returns the input of the first matching call.
    #[must_use]
    pub fn input_of(&self, call: PublishCall) -> Option<Context> {
        self.records
            .lock()
            .iter()
            .find(|(c, _)| *c == call)
            .map(|(_, ctx)| ctx.clone())
    }

    /// Clears recorded calls.
    pub fn reset(&self) {
        self.records.lock().clear();
    }

    /// Unwraps the inner pipeline.
    pub fn into_inner(self) -> P {
        self.inner
    }

    fn record(&self, call: PublishCall, context: &Context) {
        self.records.lock().push((call, context.clone()));
    }
}

impl<P: Publish> Publish for RecordingPublish<P> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn pre_publish(&self, context: &Context) -> Result<Context, PublishError> {
        self.record(PublishCall::Forward(PublishStage::PrePublish), context);
        self.inner.pre_publish(context)
    }

    fn rollback_pre_publish(&self, context: &Context) -> Result<(), PublishError> {
        self.record(PublishCall::Rollback(PublishStage::PrePublish), context);
        self.inner.rollback_pre_publish(context)
    }

    fn publish(&self, context: &Context) -> Result<Context, PublishError> {
        self.record(PublishCall::Forward(PublishStage::Publish), context);
        self.inner.publish(context)
    }

    fn rollback_publish(&self, context: &Context) -> Result<(), PublishError> {
        self.record(PublishCall::Rollback(PublishStage::Publish), context);
        self.inner.rollback_publish(context)
    }

    fn post_publish(&self, context: &Context) -> Result<Context, PublishError> {
        self.record(PublishCall::Forward(PublishStage::PostPublish), context);
        self.inner.post_publish(context)
    }

    fn rollback_post_publish(&self, context: &Context) -> Result<(), PublishError> {
        self.record(PublishCall::Rollback(PublishStage::PostPublish), context);
        self.inner.rollback_post_publish(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::DefaultPublish;

    #[test]
    fn test_records_calls_and_inputs() {
        let recording = RecordingPublish::new(DefaultPublish);
        let mut ctx = Context::new();
        ctx.set_int("n", 3);

        recording.pre_publish(&ctx).unwrap();
        recording.rollback_pre_publish(&ctx).unwrap();

        assert_eq!(
            recording.calls(),
            vec![
                PublishCall::Forward(PublishStage::PrePublish),
                PublishCall::Rollback(PublishStage::PrePublish),
            ]
        );
        assert_eq!(
            recording.input_of(PublishCall::Rollback(PublishStage::PrePublish)),
            Some(ctx)
        );

        recording.reset();
        assert_eq!(recording.call_count(), 0);
    }
}
