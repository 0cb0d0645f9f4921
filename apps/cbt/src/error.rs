//! CLI error handling

use std::fmt;

use cbt_errors::UserFacingError;

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Configuration error
    Config(cbt_errors::ConfigError),
    /// Build orchestration error
    Build(cbt_errors::Error),
    /// One or more selected profiles did not build cleanly
    BuildFailed { profiles: Vec<String> },
    /// I/O error
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "Configuration error: {e}"),
            CliError::Build(e) => {
                let message = e.user_message();
                write!(f, "{message}")?;
                if let Some(code) = e.user_code() {
                    write!(f, "\n  Code: {code}")?;
                }
                if let Some(hint) = e.user_hint() {
                    write!(f, "\n  Hint: {hint}")?;
                }
                if e.is_retryable() {
                    write!(f, "\n  Retry: safe to retry this operation.")?;
                }
                Ok(())
            }
            CliError::BuildFailed { profiles } => {
                write!(f, "Build failed for: {}", profiles.join(", "))
            }
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Build(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::BuildFailed { .. } => None,
        }
    }
}

impl From<cbt_errors::ConfigError> for CliError {
    fn from(e: cbt_errors::ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<cbt_errors::Error> for CliError {
    fn from(e: cbt_errors::Error) -> Self {
        match e {
            cbt_errors::Error::Config(config_error) => CliError::Config(config_error),
            other => CliError::Build(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cbt_errors::BuildError;

    #[test]
    fn test_build_error_display_includes_hint() {
        let error: cbt_errors::Error = BuildError::ToolUnavailable {
            program: "cmake".to_string(),
            message: "No such file or directory".to_string(),
        }
        .into();
        let rendered = CliError::Build(error).to_string();
        assert!(rendered.contains("failed to run cmake"));
        assert!(rendered.contains("Code: build.tool_unavailable"));
        assert!(rendered.contains("Hint:"));
    }

    #[test]
    fn test_build_failed_lists_profiles() {
        let error = CliError::BuildFailed {
            profiles: vec!["debug".to_string(), "release".to_string()],
        };
        assert_eq!(error.to_string(), "Build failed for: debug, release");
    }
}
