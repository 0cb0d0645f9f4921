//! Integration tests for config

#[cfg(test)]
mod tests {
    use cbt_config::*;
    use cbt_types::{ColorChoice, OutputFormat};
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Mutex to ensure env var tests don't run concurrently
    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    #[tokio::test]
    async fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[general]
default_output = "plain"
color = "never"

[build]
build_jobs = 4
test_target = "check"

[tools]
cmake = "cmake3"
        "#
        )
        .unwrap();

        let config = Config::load_from_file(temp_file.path()).await.unwrap();
        assert_eq!(config.general.default_output, OutputFormat::Plain);
        assert_eq!(config.general.color, ColorChoice::Never);
        assert_eq!(config.build.build_jobs, 4);
        assert_eq!(config.build.test_target, "check");
        assert_eq!(config.tools.cmake, "cmake3");
        assert_eq!(config.tools.make, "make");
    }

    #[tokio::test]
    async fn test_partial_file_keeps_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[build]
build_jobs = 2
        "#
        )
        .unwrap();

        let config = Config::load_from_file(temp_file.path()).await.unwrap();
        assert_eq!(config.build.build_jobs, 2);
        assert_eq!(config.build.test_target, "test");
        assert_eq!(config.general.default_output, OutputFormat::Tty);
    }

    #[tokio::test]
    async fn test_empty_tool_name_rejected() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[tools]
make = ""
        "#
        )
        .unwrap();

        let result = Config::load_from_file(temp_file.path()).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_env() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        // Clean up any existing env vars first
        std::env::remove_var("CBT_OUTPUT");
        std::env::remove_var("CBT_COLOR");
        std::env::remove_var("CBT_MAKE");

        std::env::set_var("CBT_OUTPUT", "json");
        std::env::set_var("CBT_COLOR", "always");
        std::env::set_var("CBT_MAKE", "gmake");

        let mut config = Config::default();
        config.merge_env().unwrap();

        assert_eq!(config.general.default_output, OutputFormat::Json);
        assert_eq!(config.general.color, ColorChoice::Always);
        assert_eq!(config.tools.make, "gmake");

        // Clean up
        std::env::remove_var("CBT_OUTPUT");
        std::env::remove_var("CBT_COLOR");
        std::env::remove_var("CBT_MAKE");
    }

    #[test]
    fn test_invalid_env_value() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        // Clean up any existing env vars first
        std::env::remove_var("CBT_OUTPUT");
        std::env::remove_var("CBT_BUILD_JOBS");

        std::env::set_var("CBT_OUTPUT", "invalid");

        let mut config = Config::default();
        let result = config.merge_env();
        assert!(result.is_err());

        std::env::remove_var("CBT_OUTPUT");
        std::env::set_var("CBT_BUILD_JOBS", "many");

        let mut config = Config::default();
        let result = config.merge_env();
        assert!(result.is_err());

        // Clean up
        std::env::remove_var("CBT_BUILD_JOBS");
    }

    #[test]
    fn test_calculate_build_jobs() {
        assert_eq!(calculate_build_jobs(6), 6);
        assert!(calculate_build_jobs(0) >= 1);
    }
}
