//! # Dependency Wiring
//!
//! Builds the concrete adapters and injects them into the onboarding
//! [`WizardSession`]. This is the only place that names adapter types.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use tracing::debug;

use gs_app::{ActionRunner, CompletionHandler, StoreSessionResult, WizardSession};
use gs_core::config::AppConfig;
use gs_core::flows::onboarding::{self, OnboardingStep};
use gs_core::ports::{TranslationPort, WizardEventPort};
use gs_core::WizardSnapshot;
use gs_infra::{FileSessionResultStore, SimulatedBackend, SystemClock, TomlTranslationCatalog};

use crate::terminal::Renderer;

const APP_DIR_NAME: &str = "govservices";

/// Everything the terminal loop needs.
pub struct HostContext {
    pub session: Arc<WizardSession<OnboardingStep>>,
    pub renderer: Renderer,
    pub data_dir: PathBuf,
    pub session_result_path: PathBuf,
}

/// Forwards committed transitions to the log. The terminal renders from the
/// states returned by the session, so snapshots are only recorded here.
struct LoggingWizardEvents;

#[async_trait]
impl WizardEventPort for LoggingWizardEvents {
    async fn emit_state_changed(&self, snapshot: WizardSnapshot) {
        debug!(
            flow = %snapshot.flow,
            step = %snapshot.current_step,
            progress = snapshot.progress_percent,
            history = ?snapshot.history,
            "wizard snapshot"
        );
    }
}

/// `general.data_dir`, or `<platform data dir>/govservices` when left empty.
pub fn resolve_data_dir(config: &AppConfig) -> anyhow::Result<PathBuf> {
    if !config.general.data_dir.as_os_str().is_empty() {
        return Ok(config.general.data_dir.clone());
    }
    let base = dirs::data_dir().context("Failed to determine the platform data directory")?;
    Ok(base.join(APP_DIR_NAME))
}

pub fn wire_onboarding(config: &AppConfig, locale: &str) -> anyhow::Result<HostContext> {
    let data_dir = resolve_data_dir(config)?;
    let session_result_path = data_dir.join(&config.storage.session_result_file);

    let backend = Arc::new(SimulatedBackend::new(config.simulator.clone()));
    let runner = Arc::new(ActionRunner::new(backend));
    let store = Arc::new(FileSessionResultStore::new(session_result_path.clone()));
    let completion: Arc<dyn CompletionHandler> =
        Arc::new(StoreSessionResult::new(store, Arc::new(SystemClock)));

    let table = onboarding::step_table().context("Invalid onboarding step table")?;
    let session = WizardSession::new(
        table,
        runner,
        config.simulator.clone(),
        Arc::new(LoggingWizardEvents),
        completion,
    );

    let catalog = TomlTranslationCatalog::builtin(config.general.default_locale.clone())
        .context("Failed to load the built-in translations")?;
    let translator: Arc<dyn TranslationPort> = Arc::new(catalog);

    debug!(
        data_dir = %data_dir.display(),
        session_result = %session_result_path.display(),
        "onboarding wired"
    );

    Ok(HostContext {
        session: Arc::new(session),
        renderer: Renderer::new(translator, locale),
        data_dir,
        session_result_path,
    })
}
