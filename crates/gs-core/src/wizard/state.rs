use crate::form::FormAccumulator;

use super::StepId;

/// Cursor position plus the data collected so far.
///
/// `history` holds only steps strictly before `current`; it never ends with
/// the current step.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardState<S: StepId> {
    current: S,
    history: Vec<S>,
    accumulator: FormAccumulator,
}

impl<S: StepId> WizardState<S> {
    pub(crate) fn initial(first: S) -> Self {
        Self {
            current: first,
            history: Vec::new(),
            accumulator: FormAccumulator::new(),
        }
    }

    pub fn current(&self) -> S {
        self.current
    }

    pub fn history(&self) -> &[S] {
        &self.history
    }

    pub fn accumulator(&self) -> &FormAccumulator {
        &self.accumulator
    }

    pub(crate) fn advance(&mut self, next: S, accumulator: FormAccumulator) {
        self.history.push(self.current);
        self.current = next;
        self.accumulator = accumulator;
    }

    pub(crate) fn pop(&mut self) -> Option<S> {
        let previous = self.history.pop()?;
        self.current = previous;
        Some(previous)
    }

    /// Jumps back to `history[index]`, dropping it and everything after it.
    pub(crate) fn rewind_to(&mut self, index: usize) {
        self.current = self.history[index];
        self.history.truncate(index);
    }
}
