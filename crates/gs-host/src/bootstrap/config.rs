//! # Configuration Loader
//!
//! Reads the host's TOML file into [`AppConfig`]. Values are taken as they
//! are; sections that are missing fall back to their serde defaults.

use std::path::Path;

use anyhow::Context;
use gs_core::config::AppConfig;
use tracing::warn;

/// Load configuration from a TOML file.
///
/// A missing file is not an error: the defaults are used and a warning is
/// logged. A file that exists but cannot be read or parsed is an error.
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    if !config_path.exists() {
        warn!(
            path = %config_path.display(),
            "config file not found, using defaults"
        );
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    AppConfig::from_toml_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gs_core::ActionKind;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_reads_valid_toml() {
        let toml_content = r#"
            [general]
            default_locale = "hi"
            data_dir = "/tmp/govservices"

            [simulator]
            accepted_otp = "654321"

            [simulator.latency_ms]
            verify_otp = 10
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.general.default_locale, "hi");
        assert_eq!(config.simulator.accepted_otp, "654321");
        assert_eq!(
            config.simulator.latency_for(ActionKind::VerifyOtp),
            Duration::from_millis(10)
        );
        assert_eq!(
            config.simulator.latency_for(ActionKind::SendOtp),
            Duration::from_millis(2_000)
        );
    }

    #[test]
    fn test_load_config_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_config_rejects_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[general\ndefault_locale = ").unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_config_empty_file_is_default() {
        let temp_file = NamedTempFile::new().unwrap();
        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
