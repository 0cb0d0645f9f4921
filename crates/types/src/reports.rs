//! Report type definitions for build runs

use crate::profile::{BuildPhase, BuildProfile};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Build report covering one orchestrator run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BuildReport {
    /// Project root that was built
    pub project_dir: PathBuf,
    /// Per-profile outcomes, in processing order
    pub profiles: Vec<ProfileReport>,
    /// Total execution time
    pub duration_ms: u64,
}

impl BuildReport {
    /// Whether every selected profile succeeded
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.profiles
            .iter()
            .all(|profile| !matches!(profile.status, ProfileStatus::Failed { .. }))
    }

    /// Names of the profiles that failed, in processing order
    #[must_use]
    pub fn failed_profiles(&self) -> Vec<String> {
        self.profiles
            .iter()
            .filter(|report| matches!(report.status, ProfileStatus::Failed { .. }))
            .map(|report| report.profile.to_string())
            .collect()
    }
}

/// Outcome of a single profile
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileReport {
    /// Profile this entry describes
    pub profile: BuildProfile,
    /// What happened
    pub status: ProfileStatus,
    /// Whether the configure step ran during this invocation
    pub configured: bool,
    /// Time spent on this profile
    pub duration_ms: u64,
}

impl ProfileReport {
    /// Entry for a profile that was not selected for this run
    #[must_use]
    pub fn skipped(profile: BuildProfile) -> Self {
        Self {
            profile,
            status: ProfileStatus::Skipped,
            configured: false,
            duration_ms: 0,
        }
    }
}

/// Status of one profile after a run
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum ProfileStatus {
    /// All steps completed
    Succeeded,
    /// A step exited non-zero, later steps were not run
    Failed {
        phase: BuildPhase,
        message: String,
        exit_code: Option<i32>,
    },
    /// Profile was not part of the selection
    Skipped,
}
