//! Run reports.

use crate::core::{PublishStage, PublishState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of one rollback in the cascade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollbackRecord {
    /// The stage whose effects were being undone.
    pub stage: PublishStage,
    /// Whether the rollback succeeded.
    pub succeeded: bool,
    /// The rollback's error message, if it failed.
    pub error: Option<String>,
}

impl RollbackRecord {
    /// Records a successful rollback.
    #[must_use]
    pub fn succeeded(stage: PublishStage) -> Self {
        Self {
            stage,
            succeeded: true,
            error: None,
        }
    }

    /// Records a failed rollback.
    #[must_use]
    pub fn failed(stage: PublishStage, error: impl Into<String>) -> Self {
        Self {
            stage,
            succeeded: false,
            error: Some(error.into()),
        }
    }
}

/// What happened during one publish run.
///
/// `states` lists every state the run entered, in order, starting with
/// [`PublishState::NotStarted`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique id of the run.
    pub run_id: Uuid,
    /// Pipeline name.
    pub pipeline: String,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run reached a terminal state.
    pub ended_at: Option<DateTime<Utc>>,
    /// States entered, in order.
    pub states: Vec<PublishState>,
    /// Rollbacks attempted, in order.
    pub rollbacks: Vec<RollbackRecord>,
}

impl RunReport {
    /// Starts a report for a run of `pipeline`.
    #[must_use]
    pub fn new(pipeline: impl Into<String>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            pipeline: pipeline.into(),
            started_at: Utc::now(),
            ended_at: None,
            states: vec![PublishState::NotStarted],
            rollbacks: Vec::new(),
        }
    }

    /// Returns the latest state.
    #[must_use]
    pub fn state(&self) -> PublishState {
        self.states.last().copied().unwrap_or_default()
    }

    /// Returns true if the run completed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.state() == PublishState::Completed
    }

    /// Returns the stages that were rolled back, in cascade order.
    #[must_use]
    pub fn rolled_back_stages(&self) -> Vec<PublishStage> {
        self.rollbacks.iter().map(|r| r.stage).collect()
    }

    /// Returns the wall-clock duration in milliseconds once the run ended.
    #[must_use]
    pub fn duration_ms(&self) -> Option<i64> {
        self.ended_at
            .map(|end| (end - self.started_at).num_milliseconds())
    }

    pub(crate) fn enter(&mut self, state: PublishState) {
        self.states.push(state);
    }

    pub(crate) fn record_rollback(&mut self, record: RollbackRecord) {
        self.rollbacks.push(record);
    }

    pub(crate) fn finish(&mut self) {
        self.ended_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report() {
        let report = RunReport::new("release");
        assert_eq!(report.pipeline, "release");
        assert_eq!(report.state(), PublishState::NotStarted);
        assert!(report.ended_at.is_none());
        assert!(report.duration_ms().is_none());
        assert!(!report.is_success());
    }

    #[test]
    fn test_report_tracks_states() {
        let mut report = RunReport::new("release");
        report.enter(PublishState::PrePublishing);
        report.enter(PublishState::RollingBackPrePublish);
        report.record_rollback(RollbackRecord::failed(PublishStage::PrePublish, "boom"));
        report.enter(PublishState::Failed);
        report.finish();

        assert_eq!(report.state(), PublishState::Failed);
        assert_eq!(report.rolled_back_stages(), vec![PublishStage::PrePublish]);
        assert!(report.duration_ms().unwrap() >= 0);
    }

    #[test]
    fn test_report_serializes() {
        let mut report = RunReport::new("release");
        report.record_rollback(RollbackRecord::succeeded(PublishStage::Publish));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["pipeline"], "release");
        assert_eq!(json["states"][0], "not_started");
        assert_eq!(json["rollbacks"][0]["stage"], "publish");
        assert_eq!(json["rollbacks"][0]["succeeded"], true);
    }
}
