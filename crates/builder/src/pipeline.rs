//! Per-profile build pipeline

use crate::exec::{millis, render_command, run_tool};
use crate::toolchain::Toolchain;
use cbt_errors::{BuildError, Error, UserFacingError};
use cbt_events::{AppEvent, BuildEvent, EventEmitter, EventSender, FailureContext};
use cbt_types::{BuildPhase, BuildProfile, ProfileReport, ProfileStatus};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// File the generator leaves behind in a configured tree
///
/// Its presence is the only signal that configure can be skipped. The
/// orchestrator never creates, rewrites or deletes it.
pub const CACHE_MARKER: &str = "CMakeCache.txt";

/// Runs configure, build and test for a single profile
///
/// The first failing step stops the remaining steps of this profile. The
/// outcome is always folded into a `ProfileReport`; only the orchestrator
/// decides what a failed profile means for the run as a whole.
pub(crate) struct ProfilePipeline<'a> {
    profile: BuildProfile,
    project_dir: &'a Path,
    build_dir: PathBuf,
    toolchain: &'a Toolchain,
    jobs: usize,
    test_target: &'a str,
    event_sender: Option<&'a EventSender>,
    phase: BuildPhase,
    configured: bool,
}

impl EventEmitter for ProfilePipeline<'_> {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender
    }
}

impl<'a> ProfilePipeline<'a> {
    pub(crate) fn new(
        profile: BuildProfile,
        project_dir: &'a Path,
        build_dir: PathBuf,
        toolchain: &'a Toolchain,
        jobs: usize,
        test_target: &'a str,
        event_sender: Option<&'a EventSender>,
    ) -> Self {
        Self {
            profile,
            project_dir,
            build_dir,
            toolchain,
            jobs,
            test_target,
            event_sender,
            phase: BuildPhase::Configure,
            configured: false,
        }
    }

    /// Run all steps and fold the outcome into a report entry
    pub(crate) async fn run(mut self) -> ProfileReport {
        let start = Instant::now();

        self.emit(AppEvent::Build(BuildEvent::ProfileStarted {
            profile: self.profile,
            build_dir: self.build_dir.clone(),
        }));

        let outcome = self.execute().await;
        let duration_ms = millis(start.elapsed());

        match outcome {
            Ok(()) => {
                self.emit(AppEvent::Build(BuildEvent::ProfileCompleted {
                    profile: self.profile,
                    duration: start.elapsed(),
                }));
                ProfileReport {
                    profile: self.profile,
                    status: ProfileStatus::Succeeded,
                    configured: self.configured,
                    duration_ms,
                }
            }
            Err(error) => {
                self.emit(AppEvent::Build(BuildEvent::ProfileFailed {
                    profile: self.profile,
                    phase: self.phase,
                    failure: FailureContext::from_error(&error),
                }));
                let exit_code = match &error {
                    Error::Build(build_error) => build_error.exit_code(),
                    _ => None,
                };
                ProfileReport {
                    profile: self.profile,
                    status: ProfileStatus::Failed {
                        phase: self.phase,
                        message: error.user_message().into_owned(),
                        exit_code,
                    },
                    configured: self.configured,
                    duration_ms,
                }
            }
        }
    }

    async fn execute(&mut self) -> Result<(), Error> {
        let cache_file = self.build_dir.join(CACHE_MARKER);
        if cache_file.exists() {
            self.emit(AppEvent::Build(BuildEvent::ConfigureSkipped {
                profile: self.profile,
                cache_file,
            }));
        } else {
            self.phase = BuildPhase::Configure;
            self.configured = true;
            self.run_step(self.toolchain.cmake(), &self.configure_args())
                .await?;
        }

        self.phase = BuildPhase::Build;
        self.run_step(self.toolchain.make(), &self.build_args())
            .await?;

        self.phase = BuildPhase::Test;
        self.run_step(self.toolchain.make(), &self.test_args()).await?;

        Ok(())
    }

    async fn run_step(&self, program: &str, args: &[String]) -> Result<(), Error> {
        let phase = self.phase;
        self.emit(AppEvent::Build(BuildEvent::PhaseStarted {
            profile: self.profile,
            phase,
        }));

        let command = render_command(program, args);
        self.emit(AppEvent::Build(BuildEvent::CommandStarted {
            profile: self.profile,
            command: command.clone(),
            working_dir: self.build_dir.clone(),
        }));

        let output = run_tool(program, args, &self.build_dir).await?;

        self.emit(AppEvent::Build(BuildEvent::CommandCompleted {
            profile: self.profile,
            command,
            exit_code: output.exit_code,
            duration: output.duration,
        }));

        if !output.success {
            return Err(self.step_error(program, output.exit_code).into());
        }

        self.emit(AppEvent::Build(BuildEvent::PhaseCompleted {
            profile: self.profile,
            phase,
            duration: output.duration,
        }));
        Ok(())
    }

    fn step_error(&self, program: &str, exit_code: Option<i32>) -> BuildError {
        let message = match exit_code {
            Some(code) => format!("{program} exited with code {code}"),
            None => format!("{program} was terminated by a signal"),
        };
        let profile = self.profile.to_string();
        match self.phase {
            BuildPhase::Configure => BuildError::ConfigureFailed {
                profile,
                message,
                exit_code,
            },
            BuildPhase::Build => BuildError::CompileFailed {
                profile,
                message,
                exit_code,
            },
            BuildPhase::Test => BuildError::TestsFailed {
                profile,
                message,
                exit_code,
            },
        }
    }

    fn configure_args(&self) -> Vec<String> {
        configure_args(self.project_dir, self.profile)
    }

    fn build_args(&self) -> Vec<String> {
        vec![format!("-j{}", self.jobs)]
    }

    fn test_args(&self) -> Vec<String> {
        vec![self.test_target.to_string(), format!("-j{}", self.jobs)]
    }
}

/// cmake arguments for an initial configure: the source directory first,
/// then the build type for this profile
pub(crate) fn configure_args(project_dir: &Path, profile: BuildProfile) -> Vec<String> {
    vec![
        project_dir.display().to_string(),
        format!("-DCMAKE_BUILD_TYPE={}", profile.cmake_build_type()),
    ]
}
