//! Fixed on-disk layout of the build trees

use cbt_errors::{Error, Result};
use cbt_types::BuildProfile;
use std::path::{Path, PathBuf};
use tokio::fs;

/// The build tree layout rooted at `<project>/build`
///
/// The layout is fixed: `build/`, `build/debug/` and `build/release/` are
/// always created together, before any profile runs, independent of which
/// profiles were selected.
#[derive(Debug, Clone)]
pub struct BuildLayout {
    build_dir: PathBuf,
}

impl BuildLayout {
    /// Create a layout for the given project root
    #[must_use]
    pub fn new(project_dir: &Path) -> Self {
        Self {
            build_dir: project_dir.join("build"),
        }
    }

    /// Top-level build directory
    #[must_use]
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Directory a profile is configured and compiled in
    #[must_use]
    pub fn profile_dir(&self, profile: BuildProfile) -> PathBuf {
        self.build_dir.join(profile.dir_name())
    }

    /// Create any missing layout directories
    ///
    /// Existing directories and their contents are left untouched, so
    /// calling this on every run is safe.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created.
    pub async fn ensure(&self) -> Result<()> {
        let mut dirs = vec![self.build_dir.clone()];
        dirs.extend(BuildProfile::ALL.iter().map(|profile| self.profile_dir(*profile)));

        for dir in dirs {
            if !dir.exists() {
                fs::create_dir(&dir)
                    .await
                    .map_err(|e| Error::io_with_path(&e, dir.clone()))?;
            }
        }
        Ok(())
    }
}
