//! Wizard domain module.
//!
//! A wizard is an ordered table of steps plus a cursor over it. Forward
//! movement is gated by the current step's guard; backward movement never
//! discards entered data.

mod error;
mod snapshot;
mod state;
pub mod state_machine;
mod step;

pub use error::{ConfigError, GuardError};
pub use snapshot::WizardSnapshot;
pub use state::WizardState;
pub use state_machine::{WizardAction, WizardEvent, WizardStateMachine};
pub use step::{StepDefinition, StepGuard, StepId, StepTable};
