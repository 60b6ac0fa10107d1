//! Runner tests against mocked pipelines.

#[cfg(test)]
mod tests {
    use crate::context::Context;
    use crate::core::{PublishStage, PublishState};
    use crate::errors::PublishError;
    use crate::pipeline::{Publish, PublishRunner, RollbackPolicy, RunnerConfig, run};
    use mockall::{Sequence, mock};
    use pretty_assertions::assert_eq;

    mock! {
        pub Pipeline {}

        impl Publish for Pipeline {
            fn pre_publish(&self, context: &Context) -> Result<Context, PublishError>;
            fn rollback_pre_publish(&self, context: &Context) -> Result<(), PublishError>;
            fn publish(&self, context: &Context) -> Result<Context, PublishError>;
            fn rollback_publish(&self, context: &Context) -> Result<(), PublishError>;
            fn post_publish(&self, context: &Context) -> Result<Context, PublishError>;
            fn rollback_post_publish(&self, context: &Context) -> Result<(), PublishError>;
        }
    }

    fn stamp(key: &'static str) -> impl Fn(&Context) -> Result<Context, PublishError> {
        move |ctx| {
            let mut next = ctx.clone();
            next.set_bool(key, true);
            Ok(next)
        }
    }

    #[test]
    fn test_success_calls_forward_stages_once_in_order() {
        let mut mock = MockPipeline::new();
        let mut seq = Sequence::new();

        mock.expect_pre_publish()
            .times(1)
            .in_sequence(&mut seq)
            .returning(stamp("pre"));
        mock.expect_publish()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|ctx| ctx.contains_key("pre"))
            .returning(stamp("main"));
        mock.expect_post_publish()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|ctx| ctx.contains_key("main"))
            .returning(stamp("post"));
        mock.expect_rollback_pre_publish().never();
        mock.expect_rollback_publish().never();
        mock.expect_rollback_post_publish().never();

        let ctx = run(&mock).unwrap();
        assert_eq!(ctx.keys().collect::<Vec<_>>(), vec!["pre", "main", "post"]);
    }

    #[test]
    fn test_post_publish_failure_rolls_back_all_in_reverse() {
        let mut mock = MockPipeline::new();
        let mut seq = Sequence::new();

        mock.expect_pre_publish()
            .times(1)
            .in_sequence(&mut seq)
            .returning(stamp("pre"));
        mock.expect_publish()
            .times(1)
            .in_sequence(&mut seq)
            .returning(stamp("main"));
        mock.expect_post_publish()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(PublishError::failed("notify failed")));
        mock.expect_rollback_post_publish()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|ctx| ctx.contains_key("main"))
            .returning(|_| Ok(()));
        mock.expect_rollback_publish()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|ctx| ctx.contains_key("pre") && !ctx.contains_key("main"))
            .returning(|_| Ok(()));
        mock.expect_rollback_pre_publish()
            .times(1)
            .in_sequence(&mut seq)
            .withf(Context::is_empty)
            .returning(|_| Ok(()));

        let err = run(&mock).unwrap_err();
        assert_eq!(err.stage, PublishStage::PostPublish);
        assert_eq!(err.cause.to_string(), "notify failed");
        assert!(!err.has_rollback_failures());
    }

    #[test]
    fn test_pre_publish_failure_rolls_back_only_pre_publish() {
        let mut mock = MockPipeline::new();

        mock.expect_pre_publish()
            .times(1)
            .returning(|_| Err(PublishError::failed("lock held")));
        mock.expect_publish().never();
        mock.expect_post_publish().never();
        mock.expect_rollback_pre_publish()
            .times(1)
            .returning(|_| Ok(()));
        mock.expect_rollback_publish().never();
        mock.expect_rollback_post_publish().never();

        let err = run(&mock).unwrap_err();
        assert_eq!(err.stage, PublishStage::PrePublish);
    }

    #[test]
    fn test_best_effort_continues_after_rollback_failure() {
        let mut mock = MockPipeline::new();

        mock.expect_pre_publish().returning(stamp("pre"));
        mock.expect_publish().returning(stamp("main"));
        mock.expect_post_publish()
            .returning(|_| Err(PublishError::failed("post")));
        mock.expect_rollback_post_publish()
            .times(1)
            .returning(|_| Err(PublishError::failed("undo post")));
        mock.expect_rollback_publish()
            .times(1)
            .returning(|_| Ok(()));
        mock.expect_rollback_pre_publish()
            .times(1)
            .returning(|_| Err(PublishError::failed("undo pre")));

        let (result, report) = PublishRunner::default().run_with_report(&mock);
        let err = result.unwrap_err();

        assert_eq!(err.cause.to_string(), "post");
        assert_eq!(
            err.rollback_failures
                .iter()
                .map(|f| f.stage)
                .collect::<Vec<_>>(),
            vec![PublishStage::PostPublish, PublishStage::PrePublish]
        );
        assert_eq!(
            err.to_string(),
            "post_publish failed: post; rollback of post_publish failed: undo post; \
             rollback of pre_publish failed: undo pre"
        );
        assert_eq!(report.rollbacks.len(), 3);
        assert_eq!(report.state(), PublishState::Failed);
    }

    #[test]
    fn test_halt_on_failure_stops_cascade() {
        let mut mock = MockPipeline::new();

        mock.expect_pre_publish().returning(stamp("pre"));
        mock.expect_publish()
            .returning(|_| Err(PublishError::failed("upload")));
        mock.expect_post_publish().never();
        mock.expect_rollback_post_publish().never();
        mock.expect_rollback_publish()
            .times(1)
            .returning(|_| Err(PublishError::failed("undo upload")));
        mock.expect_rollback_pre_publish().never();

        let runner = PublishRunner::new(
            RunnerConfig::new().with_rollback_policy(RollbackPolicy::HaltOnFailure),
        );
        let (result, report) = runner.run_with_report(&mock);
        let err = result.unwrap_err();

        assert_eq!(err.stage, PublishStage::Publish);
        assert_eq!(err.rollback_failures.len(), 1);
        assert_eq!(report.rolled_back_stages(), vec![PublishStage::Publish]);
    }

    #[test]
    fn test_report_uses_configured_name() {
        let mut mock = MockPipeline::new();
        mock.expect_pre_publish().returning(stamp("pre"));
        mock.expect_publish().returning(stamp("main"));
        mock.expect_post_publish().returning(stamp("post"));

        let runner = PublishRunner::new(RunnerConfig::new().with_pipeline_name("nightly"));
        let (result, report) = runner.run_with_report(&mock);

        assert!(result.is_ok());
        assert_eq!(report.pipeline, "nightly");
        assert!(report.is_success());
        assert!(report.ended_at.is_some());
        assert!(report.rollbacks.is_empty());
    }

    #[test]
    fn test_name_defaults_to_type_name() {
        let mock = MockPipeline::new();
        assert!(mock.name().contains("MockPipeline"));
    }
}
