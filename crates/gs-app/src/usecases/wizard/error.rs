use gs_core::{ActionKind, AsyncFailure, GuardError};

/// Errors produced by [`super::WizardSession`].
///
/// All of them leave the wizard in a consistent state; the host decides how to
/// present them.
#[derive(Debug, thiserror::Error)]
pub enum WizardSessionError {
    #[error(transparent)]
    Guard(#[from] GuardError),
    #[error("{kind} failed: {failure}")]
    Action {
        kind: ActionKind,
        failure: AsyncFailure,
    },
    #[error("{kind} was cancelled before it resolved")]
    Cancelled { kind: ActionKind },
    #[error("{kind} was superseded by a newer request")]
    Superseded { kind: ActionKind },
    #[error("step `{step}` has nothing to resend")]
    NothingToResend { step: String },
    #[error("wizard is already complete")]
    AlreadyCompleted,
    #[error("completion hand-off failed: {0}")]
    HandOff(#[source] anyhow::Error),
}

impl WizardSessionError {
    /// Translation key of the inline message for this error.
    pub fn message_key(&self) -> &'static str {
        match self {
            WizardSessionError::Guard(GuardError::StepIncomplete { .. }) => "error.step_incomplete",
            WizardSessionError::Guard(GuardError::AlreadyTerminal { .. }) => {
                "error.already_terminal"
            }
            WizardSessionError::Guard(GuardError::NoHistory) => "error.no_history",
            WizardSessionError::Guard(GuardError::InvalidTarget { .. }) => "error.invalid_target",
            WizardSessionError::Action { failure, .. } => failure.message_key(),
            WizardSessionError::Cancelled { .. } => "error.cancelled",
            WizardSessionError::Superseded { .. } => "error.superseded",
            WizardSessionError::NothingToResend { .. } => "error.nothing_to_resend",
            WizardSessionError::AlreadyCompleted => "error.already_completed",
            WizardSessionError::HandOff(_) => "error.hand_off",
        }
    }
}
