use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::{EventLevel, FailureContext};
use cbt_types::{BuildPhase, BuildProfile};

/// Build-specific events for the event system
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BuildEvent {
    /// Build run started for a project
    SessionStarted {
        project_dir: PathBuf,
        profiles: Vec<BuildProfile>,
        jobs: usize,
    },

    /// Build run finished, successfully or not
    SessionCompleted {
        succeeded: usize,
        failed: usize,
        skipped: usize,
        duration: Duration,
    },

    /// Work on one profile started
    ProfileStarted {
        profile: BuildProfile,
        build_dir: PathBuf,
    },

    /// All steps of one profile completed
    ProfileCompleted {
        profile: BuildProfile,
        duration: Duration,
    },

    /// A step of this profile failed, remaining steps were skipped
    ProfileFailed {
        profile: BuildProfile,
        phase: BuildPhase,
        failure: FailureContext,
    },

    /// Pipeline phase started
    PhaseStarted {
        profile: BuildProfile,
        phase: BuildPhase,
    },

    /// Pipeline phase completed
    PhaseCompleted {
        profile: BuildProfile,
        phase: BuildPhase,
        duration: Duration,
    },

    /// Configure skipped because the generator cache already exists
    ConfigureSkipped {
        profile: BuildProfile,
        cache_file: PathBuf,
    },

    /// External command started
    CommandStarted {
        profile: BuildProfile,
        command: String,
        working_dir: PathBuf,
    },

    /// External command finished
    CommandCompleted {
        profile: BuildProfile,
        command: String,
        exit_code: Option<i32>,
        duration: Duration,
    },
}

impl BuildEvent {
    /// Severity used when routing this event to logging systems.
    #[must_use]
    pub fn level(&self) -> EventLevel {
        match self {
            Self::ProfileFailed { .. } => EventLevel::Error,
            Self::CommandStarted { .. } | Self::CommandCompleted { .. } => EventLevel::Debug,
            _ => EventLevel::Info,
        }
    }
}
