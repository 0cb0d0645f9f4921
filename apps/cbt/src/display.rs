//! Output rendering and formatting

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use console::{Style, Term};
use cbt_types::{BuildReport, ColorChoice, ProfileStatus};
use std::io;

/// Output renderer for CLI results
#[derive(Clone)]
pub struct OutputRenderer {
    /// Use JSON output format
    json_output: bool,
    /// Color configuration
    color_choice: ColorChoice,
    /// Terminal instance
    term: Term,
}

impl OutputRenderer {
    /// Create new output renderer
    pub fn new(json_output: bool, color_choice: ColorChoice) -> Self {
        Self {
            json_output,
            color_choice,
            term: Term::stdout(),
        }
    }

    /// Render the final build report
    pub fn render_report(&self, report: &BuildReport) -> io::Result<()> {
        if self.json_output {
            self.render_json(report)
        } else {
            self.render_table(report)
        }
    }

    /// Render as JSON
    fn render_json(&self, report: &BuildReport) -> io::Result<()> {
        let json = serde_json::to_string_pretty(report).map_err(io::Error::other)?;
        println!("{json}");
        Ok(())
    }

    /// Render as formatted table
    fn render_table(&self, report: &BuildReport) -> io::Result<()> {
        println!();
        println!("Build Summary");
        println!();
        println!("Project:  {}", report.project_dir.display());

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(vec![
            Cell::new("Profile").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
            Cell::new("Configured").add_attribute(Attribute::Bold),
            Cell::new("Duration").add_attribute(Attribute::Bold),
        ]);

        for profile in &report.profiles {
            let status_cell = match &profile.status {
                ProfileStatus::Succeeded => Cell::new("Built").fg(Color::Green),
                ProfileStatus::Failed { phase, .. } => {
                    Cell::new(format!("Failed ({phase})")).fg(Color::Red)
                }
                ProfileStatus::Skipped => Cell::new("Skipped"),
            };

            let duration_cell = if matches!(profile.status, ProfileStatus::Skipped) {
                Cell::new("-")
            } else {
                Cell::new(format!("{}ms", profile.duration_ms))
            };

            table.add_row(vec![
                Cell::new(profile.profile.to_string()),
                status_cell,
                Cell::new(if profile.configured { "Yes" } else { "No" }),
                duration_cell,
            ]);
        }

        println!("{table}");

        let failures: Vec<_> = report
            .profiles
            .iter()
            .filter_map(|profile| match &profile.status {
                ProfileStatus::Failed {
                    phase,
                    message,
                    exit_code,
                } => Some((profile.profile, phase, message, exit_code)),
                _ => None,
            })
            .collect();

        if !failures.is_empty() {
            println!();
            println!("Failures:");
            for (profile, phase, message, exit_code) in failures {
                match exit_code {
                    Some(code) => {
                        println!("  {profile} during {phase}: {message} (exit code {code})");
                    }
                    None => println!("  {profile} during {phase}: {message}"),
                }
            }
        }

        println!();
        if report.is_success() {
            println!(
                "{} in {}ms",
                self.style_outcome("Build succeeded", Style::new().green().bold()),
                report.duration_ms
            );
        } else {
            println!(
                "{} for {} in {}ms",
                self.style_outcome("Build failed", Style::new().red().bold()),
                report.failed_profiles().join(", "),
                report.duration_ms
            );
        }

        Ok(())
    }

    /// Style the final outcome line
    fn style_outcome(&self, text: &str, style: Style) -> String {
        if self.supports_color() {
            style.apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// Check if color output is supported
    fn supports_color(&self) -> bool {
        match self.color_choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.term.features().colors_supported(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cbt_types::{BuildPhase, BuildProfile, ProfileReport};
    use std::path::PathBuf;

    fn sample_report() -> BuildReport {
        BuildReport {
            project_dir: PathBuf::from("/tmp/proj"),
            profiles: vec![
                ProfileReport {
                    profile: BuildProfile::Debug,
                    status: ProfileStatus::Failed {
                        phase: BuildPhase::Test,
                        message: "tests failed for debug: make exited with code 1".to_string(),
                        exit_code: Some(1),
                    },
                    configured: true,
                    duration_ms: 840,
                },
                ProfileReport::skipped(BuildProfile::Release),
            ],
            duration_ms: 900,
        }
    }

    #[test]
    fn test_render_table_report() {
        let renderer = OutputRenderer::new(false, ColorChoice::Never);
        renderer.render_report(&sample_report()).unwrap();
    }

    #[test]
    fn test_render_json_report() {
        let renderer = OutputRenderer::new(true, ColorChoice::Never);
        renderer.render_report(&sample_report()).unwrap();
    }

    #[test]
    fn test_supports_color_follows_choice() {
        assert!(OutputRenderer::new(false, ColorChoice::Always).supports_color());
        assert!(!OutputRenderer::new(false, ColorChoice::Never).supports_color());
    }
}
