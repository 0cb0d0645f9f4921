//! Build profiles and profile selection

use serde::{Deserialize, Serialize};

/// A build configuration with its own out-of-tree directory
///
/// Profiles are always processed in the order of [`BuildProfile::ALL`],
/// debug before release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildProfile {
    Debug,
    Release,
}

impl BuildProfile {
    /// All profiles in processing order
    pub const ALL: [Self; 2] = [Self::Debug, Self::Release];

    /// Directory name under `build/`
    #[must_use]
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }

    /// Value passed as `CMAKE_BUILD_TYPE`
    #[must_use]
    pub fn cmake_build_type(self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Release => "Release",
        }
    }
}

impl std::fmt::Display for BuildProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Which profiles a run operates on
///
/// Resolved from the CLI flags: either flag narrows the run to the named
/// profiles, no flag at all means both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    debug: bool,
    release: bool,
}

impl Selection {
    /// Resolve a selection from the two CLI flags
    #[must_use]
    pub fn resolve(debug: bool, release: bool) -> Self {
        if debug || release {
            Self { debug, release }
        } else {
            Self::all()
        }
    }

    /// Selection covering every profile
    #[must_use]
    pub fn all() -> Self {
        Self {
            debug: true,
            release: true,
        }
    }

    /// Whether `profile` is part of this selection
    #[must_use]
    pub fn contains(self, profile: BuildProfile) -> bool {
        match profile {
            BuildProfile::Debug => self.debug,
            BuildProfile::Release => self.release,
        }
    }

    /// Selected profiles in processing order
    pub fn profiles(self) -> impl Iterator<Item = BuildProfile> {
        BuildProfile::ALL
            .into_iter()
            .filter(move |profile| self.contains(*profile))
    }

    /// Number of selected profiles, never zero
    #[must_use]
    pub fn count(self) -> usize {
        self.profiles().count()
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::all()
    }
}

/// Pipeline stage within one profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildPhase {
    Configure,
    Build,
    Test,
}

impl std::fmt::Display for BuildPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configure => write!(f, "configure"),
            Self::Build => write!(f, "build"),
            Self::Test => write!(f, "test"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_defaults_to_both() {
        let selection = Selection::resolve(false, false);
        assert!(selection.contains(BuildProfile::Debug));
        assert!(selection.contains(BuildProfile::Release));
        assert_eq!(selection.count(), 2);
    }

    #[test]
    fn test_selection_single_flag() {
        let selection = Selection::resolve(true, false);
        assert!(selection.contains(BuildProfile::Debug));
        assert!(!selection.contains(BuildProfile::Release));

        let selection = Selection::resolve(false, true);
        assert!(!selection.contains(BuildProfile::Debug));
        assert!(selection.contains(BuildProfile::Release));
    }

    #[test]
    fn test_selection_both_flags() {
        let selection = Selection::resolve(true, true);
        assert_eq!(selection.count(), 2);
    }

    #[test]
    fn test_selection_never_empty() {
        for debug in [false, true] {
            for release in [false, true] {
                assert!(Selection::resolve(debug, release).count() >= 1);
            }
        }
    }

    #[test]
    fn test_profiles_are_ordered_debug_first() {
        let order: Vec<BuildProfile> = Selection::all().profiles().collect();
        assert_eq!(order, vec![BuildProfile::Debug, BuildProfile::Release]);
    }

    #[test]
    fn test_profile_cmake_build_type() {
        assert_eq!(BuildProfile::Debug.cmake_build_type(), "Debug");
        assert_eq!(BuildProfile::Release.cmake_build_type(), "Release");
    }

    #[test]
    fn test_profile_display_matches_dir_name() {
        assert_eq!(BuildProfile::Debug.to_string(), "debug");
        assert_eq!(BuildProfile::Release.to_string(), "release");
    }
}
