//! Test assertions for contexts and run results.

use crate::context::Context;
use crate::core::PublishStage;
use crate::errors::RunError;

/// Asserts that the run succeeded and returns its context.
pub fn assert_run_succeeded(result: &Result<Context, RunError>) -> &Context {
    match result {
        Ok(context) => context,
        Err(err) => panic!("Expected success, got error: {err}"),
    }
}

/// Asserts that the run failed at `stage` and returns the error.
pub fn assert_run_failed_at(
    result: &Result<Context, RunError>,
    stage: PublishStage,
) -> &RunError {
    match result {
        Ok(context) => panic!("Expected failure at {stage}, got success with {context:?}"),
        Err(err) => {
            assert_eq!(
                err.stage, stage,
                "Expected failure at {}, got failure at {}",
                stage, err.stage
            );
            err
        }
    }
}

/// Asserts that `key` holds the string `expected`.
pub fn assert_context_string(context: &Context, key: &str, expected: &str) {
    let actual = context.get(key).map(crate::value::Value::as_str);
    assert_eq!(
        actual,
        Some(Ok(expected)),
        "Expected string {:?} for key '{}', got {:?}",
        expected,
        key,
        actual
    );
}

/// Asserts that `key` is absent.
pub fn assert_context_missing(context: &Context, key: &str) {
    assert!(
        !context.contains_key(key),
        "Expected context to lack key '{}'. Keys: {:?}",
        key,
        context.keys().collect::<Vec<_>>()
    );
}
