//! Error types for the publish framework.
//!
//! Value access errors, stage failures and the terminal run error that carries
//! the primary cause together with any secondary rollback failures.

use crate::core::PublishStage;
use crate::value::ValueType;
use std::fmt;
use thiserror::Error;

/// Errors raised by typed access into a [`Value`](crate::value::Value).
///
/// A missing object key is not an error; getters return `None` for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValueError {
    /// The value holds a different variant than the accessor expects.
    #[error("value is not {expected} (found {found})")]
    TypeMismatch {
        /// The variant the accessor required.
        expected: ValueType,
        /// The variant actually stored.
        found: ValueType,
    },

    /// An array index was past the end of the array.
    #[error("index {index} out of range for array of length {len}")]
    OutOfRange {
        /// The requested index.
        index: usize,
        /// The array length.
        len: usize,
    },
}

impl ValueError {
    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: ValueType, found: ValueType) -> Self {
        Self::TypeMismatch { expected, found }
    }

    /// Creates an out-of-range error.
    #[must_use]
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange { index, len }
    }
}

/// The error type returned by stage and rollback operations.
#[derive(Debug, Error)]
pub enum PublishError {
    /// A stage or rollback reported a business-logic failure.
    #[error("{0}")]
    Failed(String),

    /// The pipeline did not supply its own main stage.
    #[error("publish stage is not implemented")]
    MissingPublishStage,

    /// A value access inside a stage failed.
    #[error(transparent)]
    Value(#[from] ValueError),

    /// Any other error a stage chose to propagate.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PublishError {
    /// Creates a business-logic failure with the given message.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// A rollback that itself failed while compensating for a stage failure.
#[derive(Debug, Error)]
#[error("rollback of {stage} failed: {error}")]
pub struct RollbackFailure {
    /// The stage whose rollback failed.
    pub stage: PublishStage,
    /// The error reported by the rollback.
    #[source]
    pub error: PublishError,
}

impl RollbackFailure {
    /// Creates a new rollback failure.
    #[must_use]
    pub fn new(stage: PublishStage, error: PublishError) -> Self {
        Self { stage, error }
    }
}

/// The terminal error of a publish run.
///
/// The forward-stage failure that triggered the rollback cascade is always
/// kept as `cause`; rollback failures never replace it.
#[derive(Debug)]
pub struct RunError {
    /// The forward stage that failed.
    pub stage: PublishStage,
    /// The error the stage reported.
    pub cause: PublishError,
    /// Rollbacks that failed during the cascade, in the order they ran.
    pub rollback_failures: Vec<RollbackFailure>,
}

impl RunError {
    /// Creates a run error without rollback failures.
    #[must_use]
    pub fn new(stage: PublishStage, cause: PublishError) -> Self {
        Self {
            stage,
            cause,
            rollback_failures: Vec::new(),
        }
    }

    /// Attaches the rollback failures collected during the cascade.
    #[must_use]
    pub fn with_rollback_failures(mut self, failures: Vec<RollbackFailure>) -> Self {
        self.rollback_failures = failures;
        self
    }

    /// Returns true if any rollback failed.
    #[must_use]
    pub fn has_rollback_failures(&self) -> bool {
        !self.rollback_failures.is_empty()
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.stage, self.cause)?;
        for failure in &self.rollback_failures {
            write!(f, "; {failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}
