//! The built-in stage implementations.
//!
//! [`Publish`](super::Publish) uses these as its default methods. They are
//! public so that implementations overriding a stage can still delegate to the
//! default behavior for it.

use crate::context::Context;
use crate::errors::PublishError;

/// Returns an unchanged copy of the input.
pub fn identity(context: &Context) -> Result<Context, PublishError> {
    Ok(context.clone())
}

/// Always fails with [`PublishError::MissingPublishStage`].
pub fn missing_publish(_context: &Context) -> Result<Context, PublishError> {
    Err(PublishError::MissingPublishStage)
}

/// Does nothing and succeeds.
pub fn no_op_rollback(_context: &Context) -> Result<(), PublishError> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_copies_input() {
        let mut ctx = Context::new();
        ctx.set_string("k", "v");

        let out = identity(&ctx).unwrap();
        ctx.set_string("k", "changed");

        assert_eq!(out.get("k").map(crate::value::Value::as_str), Some(Ok("v")));
    }

    #[test]
    fn test_missing_publish_fails() {
        let err = missing_publish(&Context::new()).unwrap_err();
        assert_eq!(err.to_string(), "publish stage is not implemented");
    }

    #[test]
    fn test_no_op_rollback() {
        assert!(no_op_rollback(&Context::new()).is_ok());
    }
}
