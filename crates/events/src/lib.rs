#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Event system for async communication in cbt
//!
//! This crate provides a domain-driven event system with tracing integration
//! and a clean separation between producers and the CLI. All user-visible
//! output goes through events - no direct printing outside the CLI.

pub mod meta;
pub use meta::{EventLevel, EventMeta, EventSource};

pub mod events;
pub use events::{AppEvent, BuildEvent, FailureContext, GeneralEvent};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

/// An event together with the metadata captured when it was emitted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub meta: EventMeta,
    pub event: AppEvent,
}

impl EventMessage {
    /// Wrap an event with explicit metadata
    #[must_use]
    pub fn new(meta: EventMeta, event: AppEvent) -> Self {
        Self { meta, event }
    }
}

impl From<AppEvent> for EventMessage {
    fn from(event: AppEvent) -> Self {
        Self::new(event.meta(), event)
    }
}

/// Type alias for event sender
pub type EventSender = UnboundedSender<EventMessage>;

/// Type alias for event receiver
pub type EventReceiver = tokio::sync::mpsc::UnboundedReceiver<EventMessage>;

/// Create a new event channel
#[must_use]
pub fn channel() -> (EventSender, EventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// The unified trait for emitting events throughout the cbt system
///
/// This trait provides a single, consistent API for emitting events regardless
/// of whether you have a raw `EventSender` or a struct that contains one.
pub trait EventEmitter {
    /// Get the event sender for this emitter
    fn event_sender(&self) -> Option<&EventSender>;

    /// Emit an event through this emitter
    fn emit(&self, event: AppEvent) {
        if let Some(sender) = self.event_sender() {
            // Ignore send errors - if receiver is dropped, we just continue
            let _ = sender.send(EventMessage::from(event));
        }
    }

    /// Emit a debug log event
    fn emit_debug(&self, message: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::debug(message)));
    }

    /// Emit a debug log event with context
    fn emit_debug_with_context(
        &self,
        message: impl Into<String>,
        context: std::collections::HashMap<String, String>,
    ) {
        self.emit(AppEvent::General(GeneralEvent::debug_with_context(
            message, context,
        )));
    }

    /// Emit a warning event
    fn emit_warning(&self, message: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::warning(message)));
    }

    /// Emit a warning event with context
    fn emit_warning_with_context(&self, message: impl Into<String>, context: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::warning_with_context(
            message, context,
        )));
    }

    /// Emit an error event
    fn emit_error(&self, message: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::error(message)));
    }

    /// Emit an error event with details
    fn emit_error_with_details(&self, message: impl Into<String>, details: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::error_with_details(
            message, details,
        )));
    }

    /// Emit an operation started event
    fn emit_operation_started(&self, operation: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::OperationStarted {
            operation: operation.into(),
        }));
    }

    /// Emit an operation completed event
    fn emit_operation_completed(&self, operation: impl Into<String>, success: bool) {
        self.emit(AppEvent::General(GeneralEvent::OperationCompleted {
            operation: operation.into(),
            success,
        }));
    }

    /// Emit an operation failed event
    fn emit_operation_failed(&self, operation: impl Into<String>, error: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::OperationFailed {
            operation: operation.into(),
            error: error.into(),
        }));
    }
}

/// Implementation of `EventEmitter` for the raw `EventSender`
/// This allows `EventSender` to be used directly where `EventEmitter` is expected
impl EventEmitter for EventSender {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cbt_types::{BuildPhase, BuildProfile};

    #[tokio::test]
    async fn test_emit_attaches_meta() {
        let (tx, mut rx) = channel();
        tx.emit(AppEvent::Build(BuildEvent::PhaseStarted {
            profile: BuildProfile::Debug,
            phase: BuildPhase::Configure,
        }));

        let message = rx.recv().await.expect("event");
        assert_eq!(message.meta.level, EventLevel::Info);
        assert_eq!(message.meta.source, EventSource::BUILD);
        assert!(matches!(
            message.event,
            AppEvent::Build(BuildEvent::PhaseStarted { .. })
        ));
    }

    #[tokio::test]
    async fn test_failure_events_route_as_errors() {
        let (tx, mut rx) = channel();
        tx.emit(AppEvent::Build(BuildEvent::ProfileFailed {
            profile: BuildProfile::Release,
            phase: BuildPhase::Build,
            failure: FailureContext::new(
                Some("build.compile_failed"),
                "make exited with code 2",
                None::<&str>,
                false,
            ),
        }));

        let message = rx.recv().await.expect("event");
        assert_eq!(message.meta.level, EventLevel::Error);
        assert_eq!(message.meta.tracing_level(), tracing::Level::ERROR);
    }

    #[tokio::test]
    async fn test_emit_survives_dropped_receiver() {
        let (tx, rx) = channel();
        drop(rx);
        tx.emit_warning("nobody is listening");
    }

    #[test]
    fn test_event_serialization_is_tagged() {
        let event = AppEvent::Build(BuildEvent::ConfigureSkipped {
            profile: BuildProfile::Debug,
            cache_file: "build/debug/CMakeCache.txt".into(),
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["domain"], "build");
        assert_eq!(json["event"]["type"], "ConfigureSkipped");
        assert_eq!(json["event"]["profile"], "debug");
    }
}
