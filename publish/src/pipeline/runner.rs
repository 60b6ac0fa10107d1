//! The publish state machine.
//!
//! A run threads a [`Context`] through the three forward stages. When a stage
//! fails, the runner rolls back that stage and every earlier one in reverse
//! order, handing each rollback the context its forward stage consumed.

use super::config::{RollbackPolicy, RunnerConfig};
use super::report::{RollbackRecord, RunReport};
use super::Publish;
use crate::context::Context;
use crate::core::{PublishStage, PublishState};
use crate::errors::{PublishError, RollbackFailure, RunError};
use tracing::{debug, error, info, info_span, warn};

/// Runs publish pipelines.
#[derive(Debug, Clone, Default)]
pub struct PublishRunner {
    config: RunnerConfig,
}

impl PublishRunner {
    /// Creates a runner with the given configuration.
    #[must_use]
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Runs `publish` from an empty context.
    ///
    /// # Errors
    ///
    /// Returns a [`RunError`] naming the failed stage when any forward stage
    /// fails. Rollback failures are attached to it.
    pub fn run<P: Publish + ?Sized>(&self, publish: &P) -> Result<Context, RunError> {
        self.run_with_report(publish).0
    }

    /// Runs `publish` and also returns a report of the run.
    pub fn run_with_report<P: Publish + ?Sized>(
        &self,
        publish: &P,
    ) -> (Result<Context, RunError>, RunReport) {
        let pipeline = self
            .config
            .pipeline_name
            .clone()
            .unwrap_or_else(|| publish.name().to_string());
        let mut report = RunReport::new(pipeline);

        let span = info_span!(
            "publish_run",
            run_id = %report.run_id,
            pipeline = %report.pipeline,
        );
        let _entered = span.enter();
        info!("publish run started");

        // inputs[i] is the context consumed by PublishStage::ALL[i]
        let mut inputs: Vec<Context> = Vec::with_capacity(PublishStage::ALL.len());
        let mut current = Context::new();

        for stage in PublishStage::ALL {
            report.enter(stage.running_state());
            debug!(%stage, keys = current.len(), "stage started");

            match invoke_stage(publish, stage, &current) {
                Ok(next) => {
                    inputs.push(std::mem::replace(&mut current, next));
                    report.enter(stage.completed_state());
                    debug!(%stage, keys = current.len(), "stage completed");
                }
                Err(cause) => {
                    warn!(%stage, error = %cause, "stage failed, rolling back");
                    inputs.push(current);

                    let failures = self.roll_back(publish, &inputs, &mut report);
                    report.enter(PublishState::Failed);
                    report.finish();

                    let err = RunError::new(stage, cause).with_rollback_failures(failures);
                    error!(error = %err, "publish run failed");
                    return (Err(err), report);
                }
            }
        }

        report.finish();
        info!(keys = current.len(), "publish run completed");
        (Ok(current), report)
    }

    fn roll_back<P: Publish + ?Sized>(
        &self,
        publish: &P,
        inputs: &[Context],
        report: &mut RunReport,
    ) -> Vec<RollbackFailure> {
        let mut failures = Vec::new();

        for (index, input) in inputs.iter().enumerate().rev() {
            let stage = PublishStage::ALL[index];
            report.enter(stage.rollback_state());

            match invoke_rollback(publish, stage, input) {
                Ok(()) => {
                    debug!(%stage, "rollback completed");
                    report.record_rollback(RollbackRecord::succeeded(stage));
                }
                Err(error) => {
                    warn!(%stage, %error, "rollback failed");
                    report.record_rollback(RollbackRecord::failed(stage, error.to_string()));
                    failures.push(RollbackFailure::new(stage, error));

                    if self.config.rollback_policy == RollbackPolicy::HaltOnFailure {
                        warn!(%stage, "halting rollback cascade");
                        break;
                    }
                }
            }
        }

        failures
    }
}

/// Runs `publish` with the default runner configuration.
///
/// # Errors
///
/// See [`PublishRunner::run`].
pub fn run<P: Publish + ?Sized>(publish: &P) -> Result<Context, RunError> {
    PublishRunner::default().run(publish)
}

fn invoke_stage<P: Publish + ?Sized>(
    publish: &P,
    stage: PublishStage,
    context: &Context,
) -> Result<Context, PublishError> {
    match stage {
        PublishStage::PrePublish => publish.pre_publish(context),
        PublishStage::Publish => publish.publish(context),
        PublishStage::PostPublish => publish.post_publish(context),
    }
}

fn invoke_rollback<P: Publish + ?Sized>(
    publish: &P,
    stage: PublishStage,
    context: &Context,
) -> Result<(), PublishError> {
    match stage {
        PublishStage::PrePublish => publish.rollback_pre_publish(context),
        PublishStage::Publish => publish.rollback_publish(context),
        PublishStage::PostPublish => publish.rollback_post_publish(context),
    }
}
