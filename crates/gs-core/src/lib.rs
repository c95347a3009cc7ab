//! # gs-core
//!
//! Core domain models and business logic for GovServices.
//!
//! This crate contains the multi-step wizard state machine, the form data
//! accumulator it threads through every step, the concrete flows built on top
//! of it (onboarding, license application, payment, document upload) and the
//! ports that the application layer depends on. It performs no I/O.

pub mod action;
pub mod application;
pub mod config;
pub mod fees;
pub mod flows;
pub mod form;
pub mod ids;
pub mod ports;
pub mod session;
pub mod wizard;

// Re-export commonly used types at the crate root
pub use action::{AcceptRule, ActionKind, ActionOutcome, ActionRequest, AsyncFailure};
pub use config::AppConfig;
pub use form::{merge, FieldValue, FormAccumulator};
pub use ids::{ActionId, ApplicationId, SessionId};
pub use wizard::{
    ConfigError, GuardError, StepDefinition, StepId, StepTable, WizardAction, WizardEvent,
    WizardSnapshot, WizardState, WizardStateMachine,
};
