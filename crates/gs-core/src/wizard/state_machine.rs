//! Wizard state machine.
//!
//! States are the step ids of one flow; transitions are `next`, `previous`,
//! `go_to` and `reset`. The initial state is the lowest-order step and the
//! terminal state the highest-order one. Every method either commits a new
//! state or returns a [`GuardError`] with the state left exactly as it was.

use std::sync::Arc;

use crate::form::FormAccumulator;

use super::{GuardError, StepDefinition, StepId, StepTable, WizardState};

/// Navigation requests accepted by [`WizardStateMachine::dispatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum WizardEvent<S: StepId> {
    /// Merge the partial and move forward if the current step is complete.
    Next { partial: FormAccumulator },
    /// Return to the most recent step in history.
    Previous,
    /// Jump back to a step already visited (or stay on the current one).
    GoTo { target: S },
    /// Start over at the first step with an empty accumulator.
    Reset,
    /// Finish the flow from the terminal step.
    Complete { partial: FormAccumulator },
}

/// Side-effects the owner of the machine must carry out after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardAction<S: StepId> {
    /// The step was left; any action still pending for it must not land.
    CancelPendingAction { step: S },
    /// Accumulated data was dropped by a reset.
    DiscardAccumulator,
    /// The flow is complete; hand the final accumulator downstream.
    HandOff { accumulator: FormAccumulator },
}

/// Step cursor over a [`StepTable`].
#[derive(Debug, Clone)]
pub struct WizardStateMachine<S: StepId> {
    table: Arc<StepTable<S>>,
    state: WizardState<S>,
}

impl<S: StepId> WizardStateMachine<S> {
    pub fn new(table: StepTable<S>) -> Self {
        let table = Arc::new(table);
        let state = WizardState::initial(table.first().id());
        Self { table, state }
    }

    pub fn table(&self) -> &StepTable<S> {
        &self.table
    }

    pub fn state(&self) -> &WizardState<S> {
        &self.state
    }

    /// Definition of the active step. The cursor always points into the
    /// table, so this never fails.
    pub fn current(&self) -> &StepDefinition<S> {
        self.table
            .get(self.state.current())
            .unwrap_or_else(|| self.table.first())
    }

    pub fn is_terminal(&self) -> bool {
        self.table.is_terminal(self.state.current())
    }

    pub fn next(&mut self, partial: &FormAccumulator) -> Result<WizardState<S>, GuardError> {
        let current = self.current();
        let step = current.id();
        let next = self
            .table
            .next_after(step)
            .map(|def| def.id())
            .ok_or_else(|| GuardError::AlreadyTerminal {
                step: step.as_str().to_string(),
            })?;

        let merged = self.state.accumulator().merge(partial);
        if !current.is_complete(&merged) {
            return Err(GuardError::StepIncomplete {
                step: step.as_str().to_string(),
            });
        }

        self.state.advance(next, merged);
        Ok(self.state.clone())
    }

    pub fn previous(&mut self) -> Result<WizardState<S>, GuardError> {
        self.state.pop().ok_or(GuardError::NoHistory)?;
        Ok(self.state.clone())
    }

    /// Only the current step or a step already in history is a valid target.
    pub fn go_to(&mut self, target: S) -> Result<WizardState<S>, GuardError> {
        if target == self.state.current() {
            return Ok(self.state.clone());
        }

        let index = self
            .state
            .history()
            .iter()
            .position(|step| *step == target)
            .ok_or_else(|| GuardError::InvalidTarget {
                target: target.as_str().to_string(),
            })?;

        self.state.rewind_to(index);
        Ok(self.state.clone())
    }

    pub fn reset(&mut self) -> WizardState<S> {
        self.state = WizardState::initial(self.table.first().id());
        self.state.clone()
    }

    /// Evaluates the terminal step's guard against the merged accumulator
    /// and returns the final data. The cursor does not move.
    pub fn complete(&self, partial: &FormAccumulator) -> Result<FormAccumulator, GuardError> {
        let current = self.current();
        if !self.is_terminal() {
            return Err(GuardError::StepIncomplete {
                step: current.id().as_str().to_string(),
            });
        }

        let merged = self.state.accumulator().merge(partial);
        if !current.is_complete(&merged) {
            return Err(GuardError::StepIncomplete {
                step: current.id().as_str().to_string(),
            });
        }
        Ok(merged)
    }

    /// Applies `event` and reports the side-effects the caller must execute.
    pub fn dispatch(
        &mut self,
        event: WizardEvent<S>,
    ) -> Result<(WizardState<S>, Vec<WizardAction<S>>), GuardError> {
        let from = self.state.current();
        match event {
            WizardEvent::Next { partial } => {
                let state = self.next(&partial)?;
                Ok((state, vec![WizardAction::CancelPendingAction { step: from }]))
            }
            WizardEvent::Previous => {
                let state = self.previous()?;
                Ok((state, vec![WizardAction::CancelPendingAction { step: from }]))
            }
            WizardEvent::GoTo { target } => {
                let state = self.go_to(target)?;
                let actions = if state.current() == from {
                    Vec::new()
                } else {
                    vec![WizardAction::CancelPendingAction { step: from }]
                };
                Ok((state, actions))
            }
            WizardEvent::Reset => {
                let state = self.reset();
                Ok((
                    state,
                    vec![
                        WizardAction::CancelPendingAction { step: from },
                        WizardAction::DiscardAccumulator,
                    ],
                ))
            }
            WizardEvent::Complete { partial } => {
                let accumulator = self.complete(&partial)?;
                Ok((
                    self.state.clone(),
                    vec![WizardAction::HandOff { accumulator }],
                ))
            }
        }
    }
}
