//! Integration tests for events

#[cfg(test)]
mod tests {
    use cbt_errors::BuildError;
    use cbt_events::{
        channel, AppEvent, BuildEvent, EventEmitter, EventLevel, FailureContext, GeneralEvent,
    };
    use cbt_types::{BuildPhase, BuildProfile};
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_emit_helpers_attach_metadata() {
        let (tx, mut rx) = channel();

        tx.emit_error("test error");
        tx.emit_debug("test debug");

        let message = rx.recv().await.unwrap();
        assert!(matches!(
            message.event,
            AppEvent::General(GeneralEvent::Error { .. })
        ));
        assert_eq!(message.meta.level, EventLevel::Error);
        assert_eq!(message.meta.source.as_str(), "general");

        let message = rx.recv().await.unwrap();
        assert!(matches!(
            message.event,
            AppEvent::General(GeneralEvent::DebugLog { .. })
        ));
        assert_eq!(message.meta.level, EventLevel::Debug);
    }

    #[tokio::test]
    async fn test_build_events_carry_build_source() {
        let (tx, mut rx) = channel();

        tx.emit(AppEvent::Build(BuildEvent::ProfileStarted {
            profile: BuildProfile::Release,
            build_dir: PathBuf::from("/src/proj/build/release"),
        }));

        let message = rx.recv().await.unwrap();
        assert_eq!(message.meta.source.as_str(), "build");
        match message.event {
            AppEvent::Build(BuildEvent::ProfileStarted { profile, .. }) => {
                assert_eq!(profile, BuildProfile::Release);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_failure_context_from_build_error() {
        let error = BuildError::TestsFailed {
            profile: "debug".to_string(),
            message: "make exited with code 1".to_string(),
            exit_code: Some(1),
        };
        let failure = FailureContext::from_error(&error);

        assert_eq!(failure.code.as_deref(), Some("build.tests_failed"));
        assert!(failure.message.contains("tests failed for debug"));
        assert!(failure.hint.is_some());
        assert!(!failure.retryable);
    }

    #[test]
    fn test_profile_failed_serializes_with_domain_tag() {
        let event = AppEvent::Build(BuildEvent::ProfileFailed {
            profile: BuildProfile::Debug,
            phase: BuildPhase::Build,
            failure: FailureContext::new(
                Some("build.compile_failed"),
                "make exited with code 2",
                None::<String>,
                false,
            ),
        });

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["domain"], "build");
        assert_eq!(json["event"]["type"], "ProfileFailed");
        assert_eq!(json["event"]["profile"], "debug");
        assert_eq!(json["event"]["phase"], "build");
    }
}
