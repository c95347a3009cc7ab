#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gs_app::{ActionRunner, CompletionHandler, StoreSessionResult, WizardSession};
use gs_core::config::SimulatorConfig;
use gs_core::flows::onboarding::{self, OnboardingStep};
use gs_core::ports::WizardEventPort;
use gs_core::{FieldValue, FormAccumulator, WizardSnapshot};
use gs_infra::{InMemorySessionResultStore, SimulatedBackend, SystemClock};

#[derive(Default)]
pub struct RecordingEvents {
    snapshots: Mutex<Vec<WizardSnapshot>>,
}

impl RecordingEvents {
    pub fn last(&self) -> Option<WizardSnapshot> {
        self.snapshots.lock().unwrap().last().cloned()
    }

    pub fn count(&self) -> usize {
        self.snapshots.lock().unwrap().len()
    }
}

#[async_trait]
impl WizardEventPort for RecordingEvents {
    async fn emit_state_changed(&self, snapshot: WizardSnapshot) {
        self.snapshots.lock().unwrap().push(snapshot);
    }
}

pub struct Harness {
    pub session: Arc<WizardSession<OnboardingStep>>,
    pub events: Arc<RecordingEvents>,
    pub store: Arc<InMemorySessionResultStore>,
}

pub fn onboarding() -> Harness {
    let simulator = SimulatorConfig::default();
    let runner = Arc::new(ActionRunner::new(Arc::new(SimulatedBackend::new(
        simulator.clone(),
    ))));
    let events = Arc::new(RecordingEvents::default());
    let store = Arc::new(InMemorySessionResultStore::new());
    let completion: Arc<dyn CompletionHandler> =
        Arc::new(StoreSessionResult::new(store.clone(), Arc::new(SystemClock)));
    let session = WizardSession::new(
        onboarding::step_table().unwrap(),
        runner,
        simulator,
        events.clone(),
        completion,
    );
    Harness {
        session: Arc::new(session),
        events,
        store,
    }
}

pub fn field(key: &str, value: impl Into<FieldValue>) -> FormAccumulator {
    FormAccumulator::new().with(key, value)
}

pub fn profile() -> FormAccumulator {
    field(
        "profile",
        FieldValue::object([
            ("full_name", "Rahul Sharma"),
            ("email", "rahul.sharma@example.com"),
            ("date_of_birth", "1990-04-12"),
            ("address", "123 Main Street, Sector 15, New Delhi"),
        ]),
    )
}

/// Drives the session from `phone` to `profile` with accepted values.
pub async fn advance_to_profile(session: &WizardSession<OnboardingStep>) {
    session.submit(field("phone", "9876543210")).await.unwrap();
    session.submit(field("otp", "123456")).await.unwrap();
    session
        .submit(field("aadhaar", "1234 5678 9012"))
        .await
        .unwrap();
    assert_eq!(session.current_step().await, OnboardingStep::Profile);
}
