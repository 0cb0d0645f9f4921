//! Event handling and progress display

use cbt_events::{AppEvent, BuildEvent, EventMessage, GeneralEvent};
use console::Style;

/// Event handler for progress display and user feedback
pub struct EventHandler {
    /// Whether styled output is enabled
    colors_enabled: bool,
    /// Show command-level detail
    verbose: bool,
    /// Suppress human-readable output (JSON mode)
    quiet: bool,
}

impl EventHandler {
    /// Create new event handler
    pub fn new(colors_enabled: bool, verbose: bool, quiet: bool) -> Self {
        Self {
            colors_enabled,
            verbose,
            quiet,
        }
    }

    /// Handle incoming event
    pub fn handle_message(&mut self, message: EventMessage) {
        crate::logging::log_event_with_tracing(&message);

        if self.quiet {
            return;
        }

        match message.event {
            AppEvent::Build(event) => self.handle_build_event(event),
            AppEvent::General(event) => self.handle_general_event(event),
        }
    }

    fn handle_build_event(&self, event: BuildEvent) {
        match event {
            BuildEvent::SessionStarted {
                project_dir,
                profiles,
                jobs,
            } => {
                if profiles.len() == 1 {
                    self.show_status(&format!(
                        "🔨 Building {} profile of {} (-j{jobs})",
                        profiles[0],
                        project_dir.display()
                    ));
                } else {
                    self.show_status(&format!(
                        "🔨 Building {} profiles of {} (-j{jobs})",
                        profiles.len(),
                        project_dir.display()
                    ));
                }
            }
            BuildEvent::ProfileStarted { profile, build_dir } => {
                self.show_status(&format!("🔨 {profile} > {}", build_dir.display()));
            }
            BuildEvent::ProfileCompleted { profile, duration } => {
                self.show_status(&format!(
                    "✅ {profile} built ({}ms)",
                    duration.as_millis()
                ));
            }
            BuildEvent::ProfileFailed {
                profile,
                phase,
                failure,
            } => {
                self.show_error(&format!(
                    "❌ {profile} failed during {phase}: {}",
                    failure.message
                ));
            }
            BuildEvent::PhaseStarted { profile, phase } => {
                self.show_status(&format!("🔧 {profile} > {phase}"));
            }
            BuildEvent::PhaseCompleted {
                profile,
                phase,
                duration,
            } => {
                if self.verbose {
                    self.show_status(&format!(
                        "✅ {profile} > {phase} ({}ms)",
                        duration.as_millis()
                    ));
                }
            }
            BuildEvent::ConfigureSkipped { profile, cache_file } => {
                self.show_status(&format!(
                    "ℹ️  {profile} already configured ({} present)",
                    cache_file.display()
                ));
            }
            BuildEvent::CommandStarted {
                profile,
                command,
                working_dir,
            } => {
                if self.verbose {
                    self.show_status(&format!(
                        "🔧 {profile} > {command} (in {})",
                        working_dir.display()
                    ));
                }
            }
            BuildEvent::CommandCompleted {
                profile,
                command,
                exit_code,
                duration,
            } => {
                if self.verbose {
                    match exit_code {
                        Some(code) => self.show_status(&format!(
                            "🔧 {profile} > {command} exited with {code} ({}ms)",
                            duration.as_millis()
                        )),
                        None => self.show_status(&format!(
                            "🔧 {profile} > {command} terminated by signal"
                        )),
                    }
                }
            }
            // Rendered by the output renderer after the run completes
            BuildEvent::SessionCompleted { .. } => {}
        }
    }

    fn handle_general_event(&self, event: GeneralEvent) {
        match event {
            GeneralEvent::Warning { message, context } => {
                if let Some(context) = context {
                    self.show_status(&format!("⚠️  {message}: {context}"));
                } else {
                    self.show_status(&format!("⚠️  {message}"));
                }
            }
            GeneralEvent::Error { message, details } => {
                if let Some(details) = details {
                    self.show_error(&format!("❌ {message}: {details}"));
                } else {
                    self.show_error(&format!("❌ {message}"));
                }
            }
            GeneralEvent::OperationStarted { operation } => {
                self.show_status(&format!("🔄 {operation}"));
            }
            GeneralEvent::OperationFailed { operation, error } => {
                self.show_error(&format!("❌ {operation} failed: {error}"));
            }
            GeneralEvent::DebugLog { message, .. } => {
                if self.verbose {
                    self.show_status(&message);
                }
            }
            // Not displayed in the CLI, only logged
            GeneralEvent::OperationCompleted { .. } => {}
        }
    }

    /// Show status message
    fn show_status(&self, message: &str) {
        println!("{message}");
    }

    /// Show error message
    fn show_error(&self, message: &str) {
        if self.colors_enabled {
            eprintln!("{}", Style::new().red().apply_to(message));
        } else {
            eprintln!("{message}");
        }
    }
}
