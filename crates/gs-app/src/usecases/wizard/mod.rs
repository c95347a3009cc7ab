//! Session-scoped wizard orchestration.
//!
//! A [`WizardSession`] owns one [`gs_core::WizardStateMachine`] and carries out
//! the side-effects its transitions request: running step actions, cancelling
//! stale ones, emitting snapshots and handing off the final data.

mod completion;
mod error;
mod session;

pub use completion::{Completion, CompletionHandler, KeepAccumulator, StoreSessionResult};
pub use error::WizardSessionError;
pub use session::{StepOutcome, WizardSession};
