//! GovServices application orchestration layer.
//!
//! Use cases and session orchestrators built on the ports of `gs-core`.

pub mod usecases;

pub use usecases::actions::{ActionRunner, PendingAction};
pub use usecases::applications::{
    AdvanceApplicationStatus, ListApplications, SearchApplications, SubmitApplication,
    TrackApplication, TrackApplicationError,
};
pub use usecases::wizard::{
    Completion, CompletionHandler, KeepAccumulator, StepOutcome, StoreSessionResult,
    WizardSession, WizardSessionError,
};
