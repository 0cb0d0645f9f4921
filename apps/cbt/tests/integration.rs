//! Integration tests for cbt CLI

use std::process::Command;

#[test]
fn test_cli_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_cbt"))
        .arg("--version")
        .output()
        .expect("Failed to execute cbt");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("cbt"));
}

#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_cbt"))
        .arg("--help")
        .output()
        .expect("Failed to execute cbt");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("CMake/Make build orchestrator"));
    assert!(stdout.contains("--debug"));
    assert!(stdout.contains("--release"));
    assert!(stdout.contains("--project-dir"));
}

#[test]
fn test_cli_unknown_flag() {
    let output = Command::new(env!("CARGO_BIN_EXE_cbt"))
        .arg("--frobnicate")
        .output()
        .expect("Failed to execute cbt");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unexpected argument"));
}

#[test]
fn test_missing_project_fails() {
    let temp = tempfile::tempdir().expect("temp dir");
    let config = temp.path().join("config.toml");
    std::fs::write(&config, "").expect("config file");

    let output = Command::new(env!("CARGO_BIN_EXE_cbt"))
        .args([
            "--project-dir",
            temp.path().to_str().expect("utf-8 path"),
            "--config",
            config.to_str().expect("utf-8 path"),
            "--color",
            "never",
        ])
        .output()
        .expect("Failed to execute cbt");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no CMakeLists.txt found"));
}

#[cfg(unix)]
mod e2e {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;
    use std::process::Command;
    use tempfile::TempDir;

    struct StubProject {
        temp: TempDir,
    }

    impl StubProject {
        fn new() -> Self {
            let temp = tempfile::tempdir().expect("temp dir");
            fs::write(
                temp.path().join("CMakeLists.txt"),
                "cmake_minimum_required(VERSION 3.20)\nproject(stub)\n",
            )
            .expect("project file");
            fs::write(temp.path().join("config.toml"), "").expect("config file");
            Self { temp }
        }

        fn path_arg(&self) -> &str {
            self.temp.path().to_str().expect("utf-8 path")
        }

        fn config_arg(&self) -> String {
            self.temp.path().join("config.toml").display().to_string()
        }

        fn write_stub(&self, name: &str, extra: &str) -> String {
            let path = self.temp.path().join(name);
            let script = format!("#!/bin/sh\n{extra}\nexit 0\n");
            fs::write(&path, script).expect("stub script");
            let mut perms = fs::metadata(&path).expect("stub metadata").permissions();
            perms.set_mode(0o755);
            fs::set_permissions(&path, perms).expect("stub permissions");
            path.display().to_string()
        }
    }

    fn cbt(project: &StubProject) -> Command {
        let mut command = Command::new(env!("CARGO_BIN_EXE_cbt"));
        command.args(["--config", &project.config_arg()]);
        command.args(["--project-dir", project.path_arg()]);
        command.args(["-j", "2"]);
        command
    }

    #[test]
    fn test_debug_build_json_report() {
        let project = StubProject::new();
        let cmake = project.write_stub("cmake", "");
        let make = project.write_stub("make", "");

        let output = cbt(&project)
            .args(["--debug", "--json"])
            .env("CBT_CMAKE", &cmake)
            .env("CBT_MAKE", &make)
            .output()
            .expect("Failed to execute cbt");

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.trim_start().starts_with('{'));

        let report: serde_json::Value = serde_json::from_str(&stdout).expect("JSON report");
        let profiles = report["profiles"].as_array().expect("profiles array");
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0]["profile"], "debug");
        assert_eq!(profiles[0]["status"]["result"], "succeeded");
        assert_eq!(profiles[0]["configured"], true);
        assert_eq!(profiles[1]["profile"], "release");
        assert_eq!(profiles[1]["status"]["result"], "skipped");

        // The layout is created even for unselected profiles
        assert!(Path::new(project.path_arg()).join("build/debug").is_dir());
        assert!(Path::new(project.path_arg()).join("build/release").is_dir());
    }

    #[test]
    fn test_failing_build_exits_nonzero() {
        let project = StubProject::new();
        let cmake = project.write_stub("cmake", "");
        let make = project.write_stub("make", "exit 2");

        let output = cbt(&project)
            .args(["--debug", "--color", "never"])
            .env("CBT_CMAKE", &cmake)
            .env("CBT_MAKE", &make)
            .output()
            .expect("Failed to execute cbt");

        assert!(!output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stdout.contains("Build Summary"));
        assert!(stdout.contains("Failed (build)"));
        assert!(stderr.contains("Build failed for: debug"));
    }

    #[test]
    fn test_both_profiles_built_without_flags() {
        let project = StubProject::new();
        let cmake = project.write_stub("cmake", "");
        let make = project.write_stub("make", "");

        let output = cbt(&project)
            .arg("--json")
            .env("CBT_CMAKE", &cmake)
            .env("CBT_MAKE", &make)
            .output()
            .expect("Failed to execute cbt");

        assert!(output.status.success());
        let report: serde_json::Value =
            serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).expect("JSON report");
        let profiles = report["profiles"].as_array().expect("profiles array");
        assert_eq!(profiles[0]["status"]["result"], "succeeded");
        assert_eq!(profiles[1]["status"]["result"], "succeeded");
    }
}
