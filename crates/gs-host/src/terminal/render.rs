use std::sync::Arc;

use gs_app::{Completion, WizardSessionError};
use gs_core::ports::TranslationPort;
use gs_core::WizardSnapshot;

use super::InputError;

/// Turns session state and errors into translated text.
pub struct Renderer {
    translator: Arc<dyn TranslationPort>,
    locale: String,
}

impl Renderer {
    pub fn new(translator: Arc<dyn TranslationPort>, locale: impl Into<String>) -> Self {
        Self {
            translator,
            locale: locale.into(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn text(&self, key: &str) -> String {
        self.translator.translate(key, &self.locale)
    }

    pub fn step(&self, snapshot: &WizardSnapshot) -> String {
        let step = &snapshot.current_step;
        format!(
            "[{} {}%] {}\n  {}",
            self.text("ui.progress"),
            snapshot.progress_percent,
            self.text(&format!("step.{step}.title")),
            self.text(&format!("step.{step}.hint")),
        )
    }

    pub fn error(&self, err: &WizardSessionError) -> String {
        format!("! {}", self.text(err.message_key()))
    }

    pub fn input_error(&self, err: &InputError) -> String {
        format!("! {} ({err})", self.text(err.message_key()))
    }

    pub fn completion(&self, completion: &Completion) -> String {
        match completion {
            Completion::Onboarded(result) => format!(
                "{} {}, +91 {}, Aadhaar {}",
                self.text("msg.completed"),
                result.profile.full_name,
                result.phone,
                result.masked_aadhaar()
            ),
            Completion::Submitted(application) => format!(
                "{} {}",
                self.text("msg.submitted"),
                application.tracking_number
            ),
            Completion::Finished(_) => self.text("msg.completed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gs_core::GuardError;
    use gs_infra::TomlTranslationCatalog;

    fn renderer(locale: &str) -> Renderer {
        let catalog = TomlTranslationCatalog::builtin("en").unwrap();
        Renderer::new(Arc::new(catalog), locale)
    }

    fn snapshot(step: &str, progress: u8) -> WizardSnapshot {
        WizardSnapshot {
            flow: "onboarding".into(),
            current_step: step.into(),
            progress_percent: progress,
            history: Vec::new(),
            is_terminal: false,
            accumulator: serde_json::Value::Null,
        }
    }

    #[test]
    fn step_shows_progress_title_and_hint() {
        let text = renderer("en").step(&snapshot("otp", 40));
        assert!(text.starts_with("[Progress 40%] Enter OTP"));
        assert!(text.contains("otp=123456"));
    }

    #[test]
    fn missing_locale_entries_fall_back_to_english() {
        let text = renderer("hi").error(&WizardSessionError::AlreadyCompleted);
        assert_eq!(text, "! Setup is already complete");

        let text = renderer("hi").error(&WizardSessionError::Guard(GuardError::NoHistory));
        assert_eq!(text, "! कोई पिछला चरण नहीं है");
    }
}
