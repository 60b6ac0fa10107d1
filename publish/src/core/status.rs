//! Publish stages and run states.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three forward stages of a publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishStage {
    /// Preparation work before the main stage (validation, locking, staging).
    PrePublish,
    /// The main publish work.
    Publish,
    /// Follow-up work after the main stage (notification, registration).
    PostPublish,
}

impl PublishStage {
    /// All stages in forward execution order.
    pub const ALL: [Self; 3] = [Self::PrePublish, Self::Publish, Self::PostPublish];

    /// Returns the position of the stage in forward order.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::PrePublish => 0,
            Self::Publish => 1,
            Self::PostPublish => 2,
        }
    }

    /// Returns the state entered while the stage runs.
    #[must_use]
    pub fn running_state(self) -> PublishState {
        match self {
            Self::PrePublish => PublishState::PrePublishing,
            Self::Publish => PublishState::Publishing,
            Self::PostPublish => PublishState::PostPublishing,
        }
    }

    /// Returns the state entered once the stage has succeeded.
    #[must_use]
    pub fn completed_state(self) -> PublishState {
        match self {
            Self::PrePublish => PublishState::PrePublished,
            Self::Publish => PublishState::Published,
            Self::PostPublish => PublishState::Completed,
        }
    }

    /// Returns the state entered while the stage's rollback runs.
    #[must_use]
    pub fn rollback_state(self) -> PublishState {
        match self {
            Self::PrePublish => PublishState::RollingBackPrePublish,
            Self::Publish => PublishState::RollingBackPublish,
            Self::PostPublish => PublishState::RollingBackPostPublish,
        }
    }
}

impl fmt::Display for PublishStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrePublish => write!(f, "pre_publish"),
            Self::Publish => write!(f, "publish"),
            Self::PostPublish => write!(f, "post_publish"),
        }
    }
}

/// The state of a publish run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishState {
    /// Nothing has run yet.
    #[default]
    NotStarted,
    /// `pre_publish` is running.
    PrePublishing,
    /// `pre_publish` succeeded.
    PrePublished,
    /// `publish` is running.
    Publishing,
    /// `publish` succeeded.
    Published,
    /// `post_publish` is running.
    PostPublishing,
    /// All three stages succeeded.
    Completed,
    /// `rollback_post_publish` is running.
    RollingBackPostPublish,
    /// `rollback_publish` is running.
    RollingBackPublish,
    /// `rollback_pre_publish` is running.
    RollingBackPrePublish,
    /// A stage failed and the rollback cascade has finished.
    Failed,
}

impl fmt::Display for PublishState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not_started"),
            Self::PrePublishing => write!(f, "pre_publishing"),
            Self::PrePublished => write!(f, "pre_published"),
            Self::Publishing => write!(f, "publishing"),
            Self::Published => write!(f, "published"),
            Self::PostPublishing => write!(f, "post_publishing"),
            Self::Completed => write!(f, "completed"),
            Self::RollingBackPostPublish => write!(f, "rolling_back_post_publish"),
            Self::RollingBackPublish => write!(f, "rolling_back_publish"),
            Self::RollingBackPrePublish => write!(f, "rolling_back_pre_publish"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

impl PublishState {
    /// Returns true if the run can make no further progress.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Returns true if the state belongs to the rollback cascade.
    #[must_use]
    pub fn is_rolling_back(&self) -> bool {
        matches!(
            self,
            Self::RollingBackPostPublish | Self::RollingBackPublish | Self::RollingBackPrePublish
        )
    }
}
