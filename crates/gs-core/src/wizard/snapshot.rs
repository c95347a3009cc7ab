use serde::{Deserialize, Serialize};

use super::{StepId, StepTable, WizardState};

/// Serializable view of a wizard handed to the render collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardSnapshot {
    pub flow: String,
    pub current_step: String,
    pub progress_percent: u8,
    pub history: Vec<String>,
    pub is_terminal: bool,
    pub accumulator: serde_json::Value,
}

impl WizardSnapshot {
    pub fn capture<S: StepId>(table: &StepTable<S>, state: &WizardState<S>) -> Self {
        let current = state.current();
        Self {
            flow: S::FLOW.to_string(),
            current_step: current.as_str().to_string(),
            progress_percent: table
                .get(current)
                .map(|step| step.progress_percent())
                .unwrap_or_default(),
            history: state
                .history()
                .iter()
                .map(|step| step.as_str().to_string())
                .collect(),
            is_terminal: table.is_terminal(current),
            accumulator: state.accumulator().to_json(),
        }
    }
}
