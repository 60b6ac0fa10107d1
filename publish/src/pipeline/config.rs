//! Runner configuration.

use serde::{Deserialize, Serialize};

/// How the rollback cascade reacts to a failing rollback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollbackPolicy {
    /// Record the failure and keep rolling back earlier stages (default).
    #[default]
    BestEffort,
    /// Stop the cascade at the first failing rollback.
    HaltOnFailure,
}

/// Configuration for a [`PublishRunner`](super::PublishRunner).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Overrides the pipeline's own name in logs and reports.
    pub pipeline_name: Option<String>,
    /// Rollback cascade behavior.
    pub rollback_policy: RollbackPolicy,
}

impl RunnerConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pipeline name.
    #[must_use]
    pub fn with_pipeline_name(mut self, name: impl Into<String>) -> Self {
        self.pipeline_name = Some(name.into());
        self
    }

    /// Sets the rollback policy.
    #[must_use]
    pub fn with_rollback_policy(mut self, policy: RollbackPolicy) -> Self {
        self.rollback_policy = policy;
        self
    }

    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RunnerConfig::new();
        assert!(config.pipeline_name.is_none());
        assert_eq!(config.rollback_policy, RollbackPolicy::BestEffort);
    }

    #[test]
    fn test_builders() {
        let config = RunnerConfig::new()
            .with_pipeline_name("release")
            .with_rollback_policy(RollbackPolicy::HaltOnFailure);

        assert_eq!(config.pipeline_name.as_deref(), Some("release"));
        assert_eq!(config.rollback_policy, RollbackPolicy::HaltOnFailure);
    }

    #[test]
    fn test_from_json_partial() {
        let config = RunnerConfig::from_json(r#"{"rollback_policy":"halt_on_failure"}"#).unwrap();
        assert_eq!(config.rollback_policy, RollbackPolicy::HaltOnFailure);
        assert!(config.pipeline_name.is_none());

        let empty = RunnerConfig::from_json("{}").unwrap();
        assert_eq!(empty, RunnerConfig::default());
    }

    #[test]
    fn test_from_json_rejects_unknown_policy() {
        assert!(RunnerConfig::from_json(r#"{"rollback_policy":"sometimes"}"#).is_err());
    }
}
