//! Port interfaces for the application layer.
//!
//! Ports define the contract between the orchestrators in `gs-app` and the
//! adapters in `gs-infra` / `gs-host`. The wizard core itself depends on none
//! of them.

mod action_backend;
mod application_repository;
mod clock;
mod session_result;
mod translation;
mod wizard_event;

pub use action_backend::ActionBackendPort;
pub use application_repository::ApplicationRepositoryPort;
pub use clock::ClockPort;
pub use session_result::SessionResultSinkPort;
pub use translation::TranslationPort;
pub use wizard_event::WizardEventPort;
