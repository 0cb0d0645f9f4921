//! Build pipeline error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum BuildError {
    #[error("no CMakeLists.txt found in {path}")]
    MissingProjectFile { path: String },

    #[error("configure failed for {profile}: {message}")]
    ConfigureFailed {
        profile: String,
        message: String,
        exit_code: Option<i32>,
    },

    #[error("compile failed for {profile}: {message}")]
    CompileFailed {
        profile: String,
        message: String,
        exit_code: Option<i32>,
    },

    #[error("tests failed for {profile}: {message}")]
    TestsFailed {
        profile: String,
        message: String,
        exit_code: Option<i32>,
    },

    #[error("failed to run {program}: {message}")]
    ToolUnavailable { program: String, message: String },
}

impl BuildError {
    /// Exit code of the failing step, if the step ran at all
    #[must_use]
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::ConfigureFailed { exit_code, .. }
            | Self::CompileFailed { exit_code, .. }
            | Self::TestsFailed { exit_code, .. } => *exit_code,
            Self::MissingProjectFile { .. } | Self::ToolUnavailable { .. } => None,
        }
    }
}

impl UserFacingError for BuildError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::MissingProjectFile { .. } => {
                Some("Run cbt from a CMake project root or point --project-dir at one.")
            }
            Self::ConfigureFailed { .. } => {
                Some("Inspect the cmake output above. Removing the profile directory under build/ forces a clean reconfigure.")
            }
            Self::CompileFailed { .. } => Some("Inspect the compiler output above."),
            Self::TestsFailed { .. } => Some("Inspect the test output above."),
            Self::ToolUnavailable { .. } => {
                Some("Ensure cmake and make are installed and on PATH, or override them in the [tools] config section.")
            }
        }
    }

    fn is_retryable(&self) -> bool {
        false
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Self::MissingProjectFile { .. } => Some("build.missing_project_file"),
            Self::ConfigureFailed { .. } => Some("build.configure_failed"),
            Self::CompileFailed { .. } => Some("build.compile_failed"),
            Self::TestsFailed { .. } => Some("build.tests_failed"),
            Self::ToolUnavailable { .. } => Some("build.tool_unavailable"),
        }
    }
}
