//! External command execution

use cbt_errors::{BuildError, Error, Result};
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::process::Command;

/// Outcome of one external command
///
/// Output is not captured: the tools write straight to the terminal, which
/// is the user's progress display. Only the exit status is recorded.
#[derive(Debug, Clone, Copy)]
pub struct CommandOutput {
    /// Whether the command exited with status zero
    pub success: bool,
    /// Exit code, `None` when the command was terminated by a signal
    pub exit_code: Option<i32>,
    /// Wall-clock time the command took
    pub duration: Duration,
}

/// Run an external tool with stdio passed through
///
/// A non-zero exit is reported in the returned value, not as an error.
/// Only a failure to launch the program at all errors.
pub(crate) async fn run_tool(
    program: &str,
    args: &[String],
    working_dir: &Path,
) -> Result<CommandOutput> {
    let start = Instant::now();

    tracing::debug!(program, working_dir = %working_dir.display(), "spawning tool");

    let status = Command::new(program)
        .args(args)
        .current_dir(working_dir)
        .status()
        .await
        .map_err(|e| {
            Error::from(BuildError::ToolUnavailable {
                program: program.to_string(),
                message: e.to_string(),
            })
        })?;

    Ok(CommandOutput {
        success: status.success(),
        exit_code: status.code(),
        duration: start.elapsed(),
    })
}

/// Render a command line for events and logs
pub(crate) fn render_command(program: &str, args: &[String]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{program} {}", args.join(" "))
    }
}

/// Convert a duration to whole milliseconds for reports
pub(crate) fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_command() {
        assert_eq!(render_command("make", &[]), "make");
        assert_eq!(
            render_command("make", &["test".to_string(), "-j4".to_string()]),
            "make test -j4"
        );
    }

    #[tokio::test]
    async fn test_run_tool_missing_program() {
        let temp = tempfile::tempdir().unwrap();
        let result = run_tool("definitely-not-a-real-tool", &[], temp.path()).await;
        assert!(matches!(
            result,
            Err(Error::Build(BuildError::ToolUnavailable { .. }))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_tool_reports_exit_code() {
        let temp = tempfile::tempdir().unwrap();
        let output = run_tool("sh", &["-c".to_string(), "exit 3".to_string()], temp.path())
            .await
            .unwrap();
        assert!(!output.success);
        assert_eq!(output.exit_code, Some(3));
    }
}
