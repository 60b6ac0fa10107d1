//! Errors raised by the C adapter.

use publish::errors::{RunError, ValueError};
use thiserror::Error;

/// Failure of a C entry point, rendered into the caller's status message.
#[derive(Debug, Error)]
pub enum FfiError {
    /// A required pointer argument was null.
    #[error("{0} is null")]
    NullArgument(&'static str),

    /// A key was not valid UTF-8.
    #[error("key is not valid UTF-8")]
    InvalidKey,

    /// Text could not be handed to C because it contains a NUL byte.
    #[error("{0} contains an interior NUL byte")]
    InteriorNul(&'static str),

    /// A value accessor failed.
    #[error(transparent)]
    Value(#[from] ValueError),

    /// A publish run failed.
    #[error(transparent)]
    Run(#[from] RunError),
}

pub(crate) type FfiResult<T> = Result<T, FfiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use publish::core::PublishStage;
    use publish::errors::PublishError;
    use publish::value::ValueType;

    #[test]
    fn test_messages() {
        assert_eq!(FfiError::NullArgument("context").to_string(), "context is null");
        assert_eq!(
            FfiError::from(ValueError::type_mismatch(ValueType::Boolean, ValueType::None))
                .to_string(),
            "value is not boolean (found none)"
        );
        assert_eq!(
            FfiError::from(RunError::new(
                PublishStage::Publish,
                PublishError::MissingPublishStage
            ))
            .to_string(),
            "publish failed: publish stage is not implemented"
        );
    }
}
