//! Build orchestration across profiles

use crate::exec::millis;
use crate::layout::BuildLayout;
use crate::pipeline::ProfilePipeline;
use crate::toolchain::Toolchain;
use cbt_config::{calculate_build_jobs, Config};
use cbt_errors::{BuildError, Error, Result};
use cbt_events::{AppEvent, BuildEvent, EventEmitter, EventSender};
use cbt_types::{BuildProfile, BuildReport, ProfileReport, ProfileStatus, Selection};
use std::path::PathBuf;
use std::time::Instant;
use tokio::fs;

/// Drives the selected profiles through the build pipeline
///
/// Profiles run strictly in order, debug before release, one command at a
/// time. A failing step halts the remaining steps of its profile only; the
/// next profile still runs and the aggregate outcome lands in the report.
#[derive(Debug, Clone)]
pub struct Builder {
    project_dir: PathBuf,
    toolchain: Toolchain,
    jobs: usize,
    test_target: String,
    event_sender: Option<EventSender>,
}

impl EventEmitter for Builder {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }
}

impl Builder {
    /// Create a builder for the given project root with default settings
    #[must_use]
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            toolchain: Toolchain::default(),
            jobs: calculate_build_jobs(0),
            test_target: "test".to_string(),
            event_sender: None,
        }
    }

    /// Take tool names, job count and test target from a loaded config
    #[must_use]
    pub fn with_config(mut self, config: &Config) -> Self {
        self.toolchain = Toolchain::from_config(&config.tools);
        self.jobs = calculate_build_jobs(config.build.build_jobs);
        self.test_target = config.build.test_target.clone();
        self
    }

    /// Override the toolchain
    #[must_use]
    pub fn with_toolchain(mut self, toolchain: Toolchain) -> Self {
        self.toolchain = toolchain;
        self
    }

    /// Override the parallel job count, clamped to at least one
    #[must_use]
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Set event sender for progress reporting
    #[must_use]
    pub fn with_event_sender(mut self, event_sender: EventSender) -> Self {
        self.event_sender = Some(event_sender);
        self
    }

    /// Build the selected profiles and report per-profile outcomes
    ///
    /// The report covers every profile: unselected ones appear as skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the project root cannot be resolved, does not
    /// contain a `CMakeLists.txt`, or the build tree layout cannot be
    /// created. Failures of the external tools themselves do not error;
    /// they are recorded in the report.
    pub async fn build(&self, selection: Selection) -> Result<BuildReport> {
        let start = Instant::now();

        let project_dir = self.resolve_project_dir().await?;
        let layout = BuildLayout::new(&project_dir);
        layout.ensure().await?;

        self.emit(AppEvent::Build(BuildEvent::SessionStarted {
            project_dir: project_dir.clone(),
            profiles: selection.profiles().collect(),
            jobs: self.jobs,
        }));

        let mut profiles = Vec::with_capacity(BuildProfile::ALL.len());
        for profile in BuildProfile::ALL {
            if selection.contains(profile) {
                let pipeline = ProfilePipeline::new(
                    profile,
                    &project_dir,
                    layout.profile_dir(profile),
                    &self.toolchain,
                    self.jobs,
                    &self.test_target,
                    self.event_sender.as_ref(),
                );
                profiles.push(pipeline.run().await);
            } else {
                profiles.push(ProfileReport::skipped(profile));
            }
        }

        let succeeded = profiles
            .iter()
            .filter(|report| matches!(report.status, ProfileStatus::Succeeded))
            .count();
        let failed = profiles
            .iter()
            .filter(|report| matches!(report.status, ProfileStatus::Failed { .. }))
            .count();
        let skipped = profiles.len() - succeeded - failed;

        self.emit(AppEvent::Build(BuildEvent::SessionCompleted {
            succeeded,
            failed,
            skipped,
            duration: start.elapsed(),
        }));

        Ok(BuildReport {
            project_dir,
            profiles,
            duration_ms: millis(start.elapsed()),
        })
    }

    /// Canonicalize the project root and check it looks like a CMake tree
    async fn resolve_project_dir(&self) -> Result<PathBuf> {
        let project_dir = fs::canonicalize(&self.project_dir)
            .await
            .map_err(|e| Error::io_with_path(&e, self.project_dir.clone()))?;

        if !project_dir.join("CMakeLists.txt").exists() {
            return Err(BuildError::MissingProjectFile {
                path: project_dir.display().to_string(),
            }
            .into());
        }

        Ok(project_dir)
    }
}
