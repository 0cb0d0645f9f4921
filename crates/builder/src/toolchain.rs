//! External tool selection

use cbt_config::ToolsConfig;

/// The external programs the pipeline drives
///
/// Tool names are passed to the process spawner as-is, so both bare names
/// resolved via `PATH` and absolute paths work.
#[derive(Debug, Clone)]
pub struct Toolchain {
    cmake: String,
    make: String,
}

impl Toolchain {
    /// Create a toolchain from explicit program names
    #[must_use]
    pub fn new(cmake: impl Into<String>, make: impl Into<String>) -> Self {
        Self {
            cmake: cmake.into(),
            make: make.into(),
        }
    }

    /// Create a toolchain from the `[tools]` config section
    #[must_use]
    pub fn from_config(config: &ToolsConfig) -> Self {
        Self::new(config.cmake.clone(), config.make.clone())
    }

    /// Program used for the configure step
    #[must_use]
    pub fn cmake(&self) -> &str {
        &self.cmake
    }

    /// Program used for the build and test steps
    #[must_use]
    pub fn make(&self) -> &str {
        &self.make
    }
}

impl Default for Toolchain {
    fn default() -> Self {
        Self::new("cmake", "make")
    }
}
