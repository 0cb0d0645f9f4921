//! Structured logging integration for events
//!
//! This module provides structured logging capabilities that integrate with the
//! tracing ecosystem, converting domain-specific events into appropriate log
//! records with structured fields.

use cbt_events::{AppEvent, BuildEvent, EventMessage};
use tracing::{debug, error, info, trace, warn};

/// Log an AppEvent using the tracing infrastructure with structured fields
///
/// This function takes an AppEvent and logs it at the appropriate level with
/// structured fields that can be consumed by observability tools.
pub fn log_event_with_tracing(message: &EventMessage) {
    let event = &message.event;
    let meta = &message.meta;
    let level = meta.tracing_level();

    match event {
        AppEvent::Build(build_event) => match build_event {
            BuildEvent::SessionStarted {
                project_dir,
                profiles,
                jobs,
            } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    project_dir = %project_dir.display(),
                    profiles = ?profiles,
                    jobs = jobs,
                    "Build session started"
                );
            }
            BuildEvent::SessionCompleted {
                succeeded,
                failed,
                skipped,
                duration,
            } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    succeeded = succeeded,
                    failed = failed,
                    skipped = skipped,
                    duration_ms = duration.as_millis(),
                    "Build session completed"
                );
            }
            BuildEvent::ProfileStarted { profile, build_dir } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    profile = %profile,
                    build_dir = %build_dir.display(),
                    "Profile build started"
                );
            }
            BuildEvent::ProfileCompleted { profile, duration } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    profile = %profile,
                    duration_ms = duration.as_millis(),
                    "Profile build completed"
                );
            }
            BuildEvent::ProfileFailed {
                profile,
                phase,
                failure,
            } => {
                error!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    profile = %profile,
                    phase = %phase,
                    code = ?failure.code,
                    message = %failure.message,
                    "Profile build failed"
                );
            }
            BuildEvent::PhaseStarted { profile, phase } => {
                debug!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    profile = %profile,
                    phase = %phase,
                    "Phase started"
                );
            }
            BuildEvent::PhaseCompleted {
                profile,
                phase,
                duration,
            } => {
                debug!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    profile = %profile,
                    phase = %phase,
                    duration_ms = duration.as_millis(),
                    "Phase completed"
                );
            }
            BuildEvent::ConfigureSkipped {
                profile,
                cache_file,
            } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    profile = %profile,
                    cache_file = %cache_file.display(),
                    "Configure skipped, generator cache present"
                );
            }
            BuildEvent::CommandStarted {
                profile,
                command,
                working_dir,
            } => {
                debug!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    profile = %profile,
                    command = %command,
                    working_dir = %working_dir.display(),
                    "Command started"
                );
            }
            BuildEvent::CommandCompleted {
                profile,
                command,
                exit_code,
                duration,
            } => {
                debug!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    profile = %profile,
                    command = %command,
                    exit_code = ?exit_code,
                    duration_ms = duration.as_millis(),
                    "Command completed"
                );
            }
        },

        // General events carry their own level in the metadata
        AppEvent::General(general_event) => match level {
            tracing::Level::ERROR => {
                error!(source = meta.source.as_str(), event_id = %meta.event_id, event = ?general_event, "General event");
            }
            tracing::Level::WARN => {
                warn!(source = meta.source.as_str(), event_id = %meta.event_id, event = ?general_event, "General event");
            }
            tracing::Level::INFO => {
                info!(source = meta.source.as_str(), event_id = %meta.event_id, event = ?general_event, "General event");
            }
            tracing::Level::DEBUG => {
                debug!(source = meta.source.as_str(), event_id = %meta.event_id, event = ?general_event, "General event");
            }
            tracing::Level::TRACE => {
                trace!(source = meta.source.as_str(), event_id = %meta.event_id, event = ?general_event, "General event");
            }
        },
    }
}
