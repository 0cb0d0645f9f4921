#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for cbt
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/cbt/config.toml)
//! - Environment variables
//! - CLI flags

use serde::{Deserialize, Serialize};
use cbt_errors::{ConfigError, Error};
use cbt_types::{ColorChoice, OutputFormat};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub tools: ToolsConfig,
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    #[serde(default = "default_color_choice")]
    pub color: ColorChoice,
}

/// Build configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    #[serde(default = "default_build_jobs")]
    pub build_jobs: usize, // 0 = auto-detect
    #[serde(default = "default_test_target")]
    pub test_target: String,
}

/// External tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(default = "default_cmake")]
    pub cmake: String,
    #[serde(default = "default_make")]
    pub make: String,
}

// Default implementations

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: OutputFormat::Tty,
            color: ColorChoice::Auto,
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            build_jobs: 0, // 0 = auto-detect
            test_target: "test".to_string(),
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            cmake: "cmake".to_string(),
            make: "make".to_string(),
        }
    }
}

// Default value functions for serde
fn default_output_format() -> OutputFormat {
    OutputFormat::Tty
}

fn default_color_choice() -> ColorChoice {
    ColorChoice::Auto
}

fn default_build_jobs() -> usize {
    0 // 0 = auto-detect
}

fn default_test_target() -> String {
    "test".to_string()
}

fn default_cmake() -> String {
    "cmake".to_string()
}

fn default_make() -> String {
    "make".to_string()
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir.join("cbt").join("config.toml"))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        let config: Self = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "loaded configuration file");
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let config_path = Self::default_path()?;

        if config_path.exists() {
            Self::load_from_file(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// If path is provided, loads from that file.
    /// If path is None, uses the default loading behavior.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: &Option<std::path::PathBuf>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Check cross-field constraints that serde cannot express
    ///
    /// # Errors
    ///
    /// Returns an error if a tool name or the test target is empty.
    pub fn validate(&self) -> Result<(), Error> {
        if self.tools.cmake.trim().is_empty() {
            return Err(ConfigError::Invalid {
                message: "tools.cmake must not be empty".to_string(),
            }
            .into());
        }
        if self.tools.make.trim().is_empty() {
            return Err(ConfigError::Invalid {
                message: "tools.make must not be empty".to_string(),
            }
            .into());
        }
        if self.build.test_target.trim().is_empty() {
            return Err(ConfigError::Invalid {
                message: "build.test_target must not be empty".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        // CBT_OUTPUT
        if let Ok(output) = std::env::var("CBT_OUTPUT") {
            self.general.default_output = match output.as_str() {
                "plain" => OutputFormat::Plain,
                "tty" => OutputFormat::Tty,
                "json" => OutputFormat::Json,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "CBT_OUTPUT".to_string(),
                        value: output,
                    }
                    .into())
                }
            };
        }

        // CBT_COLOR
        if let Ok(color) = std::env::var("CBT_COLOR") {
            self.general.color = match color.as_str() {
                "always" => ColorChoice::Always,
                "auto" => ColorChoice::Auto,
                "never" => ColorChoice::Never,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "CBT_COLOR".to_string(),
                        value: color,
                    }
                    .into())
                }
            };
        }

        // CBT_BUILD_JOBS
        if let Ok(jobs) = std::env::var("CBT_BUILD_JOBS") {
            self.build.build_jobs = jobs.parse().map_err(|_| ConfigError::InvalidValue {
                field: "CBT_BUILD_JOBS".to_string(),
                value: jobs,
            })?;
        }

        // CBT_CMAKE
        if let Ok(cmake) = std::env::var("CBT_CMAKE") {
            if cmake.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "CBT_CMAKE".to_string(),
                    value: cmake,
                }
                .into());
            }
            self.tools.cmake = cmake;
        }

        // CBT_MAKE
        if let Ok(make) = std::env::var("CBT_MAKE") {
            if make.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "CBT_MAKE".to_string(),
                    value: make,
                }
                .into());
            }
            self.tools.make = make;
        }

        Ok(())
    }
}

/// Calculate build jobs based on CPU count
#[must_use]
pub fn calculate_build_jobs(config_value: usize) -> usize {
    if config_value > 0 {
        config_value // User override
    } else {
        // Auto-detect based on CPU count
        let cpus = num_cpus::get();

        // Use 75% of CPUs for builds, minimum 1
        // This leaves headroom for system responsiveness
        (cpus * 3 / 4).max(1)
    }
}
