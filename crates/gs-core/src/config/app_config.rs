use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::action::{AcceptRule, ActionKind, FieldFormat};
use crate::flows::{document, onboarding};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub simulator: SimulatorConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub default_locale: String,
    /// Empty means "use the platform data directory".
    pub data_dir: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_locale: "en".to_string(),
            data_dir: PathBuf::new(),
        }
    }
}

/// Latency and acceptance values of the simulated backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Per-action latency in milliseconds, keyed by action name. Actions left
    /// out use the built-in value.
    pub latency_ms: BTreeMap<String, u64>,
    pub accepted_otp: String,
    pub accepted_aadhaar: String,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            latency_ms: ActionKind::ALL
                .into_iter()
                .map(|kind| (kind.as_str().to_string(), default_latency_ms(kind)))
                .collect(),
            accepted_otp: "123456".to_string(),
            accepted_aadhaar: "123456789012".to_string(),
        }
    }
}

fn default_latency_ms(kind: ActionKind) -> u64 {
    match kind {
        ActionKind::SendOtp => 2_000,
        ActionKind::VerifyOtp => 2_000,
        ActionKind::VerifyAadhaar => 3_000,
        ActionKind::CreateProfile => 2_000,
        ActionKind::EnrollBiometric => 3_000,
        ActionKind::ProcessPayment => 1_000,
        ActionKind::UploadDocument => 2_000,
        ActionKind::SubmitApplication => 1_500,
    }
}

impl SimulatorConfig {
    /// Zero latency for every action. Used by tests and the `--fast` host flag.
    pub fn instant() -> Self {
        Self {
            latency_ms: ActionKind::ALL
                .into_iter()
                .map(|kind| (kind.as_str().to_string(), 0))
                .collect(),
            ..Self::default()
        }
    }

    pub fn latency_for(&self, kind: ActionKind) -> Duration {
        let ms = self
            .latency_ms
            .get(kind.as_str())
            .copied()
            .unwrap_or_else(|| default_latency_ms(kind));
        Duration::from_millis(ms)
    }

    pub fn accept_rule_for(&self, kind: ActionKind) -> AcceptRule {
        match kind {
            ActionKind::SendOtp => AcceptRule::format(onboarding::fields::PHONE, FieldFormat::Phone),
            ActionKind::VerifyOtp => AcceptRule::exact_match(
                onboarding::fields::OTP,
                FieldFormat::Otp,
                self.accepted_otp.clone(),
            ),
            ActionKind::VerifyAadhaar => AcceptRule::exact_match(
                onboarding::fields::AADHAAR,
                FieldFormat::Aadhaar,
                self.accepted_aadhaar.clone(),
            ),
            ActionKind::EnrollBiometric => {
                AcceptRule::format(onboarding::fields::BIOMETRIC_METHOD, FieldFormat::Text)
            }
            ActionKind::UploadDocument => {
                AcceptRule::format(document::fields::FILE_NAME, FieldFormat::Text)
            }
            ActionKind::CreateProfile
            | ActionKind::ProcessPayment
            | ActionKind::SubmitApplication => AcceptRule::AcceptAll,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Relative paths resolve against `general.data_dir`.
    pub session_result_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            session_result_file: PathBuf::from("session_result.json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.general.default_locale, "en");
        assert_eq!(
            config.simulator.latency_for(ActionKind::VerifyAadhaar),
            Duration::from_millis(3_000)
        );
    }

    #[test]
    fn partial_latency_table_keeps_other_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [general]
            default_locale = "hi"

            [simulator]
            accepted_otp = "654321"

            [simulator.latency_ms]
            verify_otp = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.general.default_locale, "hi");
        assert_eq!(
            config.simulator.latency_for(ActionKind::VerifyOtp),
            Duration::from_millis(10)
        );
        assert_eq!(
            config.simulator.latency_for(ActionKind::SendOtp),
            Duration::from_millis(2_000)
        );
        assert_eq!(config.simulator.accepted_aadhaar, "123456789012");
    }

    #[test]
    fn otp_rule_uses_configured_value() {
        let mut simulator = SimulatorConfig::instant();
        simulator.accepted_otp = "111111".into();
        assert_eq!(
            simulator.accept_rule_for(ActionKind::VerifyOtp),
            AcceptRule::exact_match("otp", FieldFormat::Otp, "111111")
        );
        assert_eq!(simulator.latency_for(ActionKind::SendOtp), Duration::ZERO);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(AppConfig::from_toml_str("[general\n").is_err());
    }
}
