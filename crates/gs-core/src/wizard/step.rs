use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use crate::action::ActionKind;
use crate::form::FormAccumulator;

use super::ConfigError;

/// Identifier of a step inside one flow.
///
/// Implemented by a plain enum per flow so that every `match` over the steps
/// of a flow is checked for exhaustiveness.
pub trait StepId: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// Name of the flow the step belongs to.
    const FLOW: &'static str;

    fn as_str(&self) -> &'static str;

    fn parse(value: &str) -> Option<Self>;
}

/// Pure predicate over the accumulator deciding whether a step may be left
/// forward.
pub type StepGuard = Arc<dyn Fn(&FormAccumulator) -> bool + Send + Sync>;

/// One row of a [`StepTable`].
#[derive(Clone)]
pub struct StepDefinition<S: StepId> {
    id: S,
    order: u32,
    progress_percent: u8,
    guard: StepGuard,
    action: Option<ActionKind>,
    resend: Option<ActionKind>,
}

impl<S: StepId> StepDefinition<S> {
    pub fn new<F>(id: S, order: u32, progress_percent: u8, guard: F) -> Self
    where
        F: Fn(&FormAccumulator) -> bool + Send + Sync + 'static,
    {
        Self {
            id,
            order,
            progress_percent,
            guard: Arc::new(guard),
            action: None,
            resend: None,
        }
    }

    /// Marks the step as requiring a backend round-trip before it completes.
    pub fn with_action(mut self, action: ActionKind) -> Self {
        self.action = Some(action);
        self
    }

    /// Action the user may re-issue while on this step, e.g. resending an OTP.
    pub fn with_resend(mut self, action: ActionKind) -> Self {
        self.resend = Some(action);
        self
    }

    pub fn id(&self) -> S {
        self.id
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn progress_percent(&self) -> u8 {
        self.progress_percent
    }

    pub fn action(&self) -> Option<ActionKind> {
        self.action
    }

    pub fn resend(&self) -> Option<ActionKind> {
        self.resend
    }

    pub fn is_complete(&self, accumulator: &FormAccumulator) -> bool {
        (self.guard)(accumulator)
    }

    /// Whether the guard would pass once the step's action has succeeded.
    /// Lets callers skip a backend round-trip that cannot complete the step.
    pub fn is_ready_for_action(&self, accumulator: &FormAccumulator) -> bool {
        match self.action {
            Some(action) => {
                self.is_complete(&accumulator.clone().with(action.completion_field(), true))
            }
            None => self.is_complete(accumulator),
        }
    }
}

impl<S: StepId> fmt::Debug for StepDefinition<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDefinition")
            .field("id", &self.id)
            .field("order", &self.order)
            .field("progress_percent", &self.progress_percent)
            .field("action", &self.action)
            .field("resend", &self.resend)
            .finish_non_exhaustive()
    }
}

/// Validated, order-sorted list of steps.
#[derive(Debug, Clone)]
pub struct StepTable<S: StepId> {
    steps: Vec<StepDefinition<S>>,
}

impl<S: StepId> StepTable<S> {
    /// Sorts the definitions by `order` and rejects empty tables, repeated
    /// ids, repeated orders and progress values above 100.
    pub fn new(mut steps: Vec<StepDefinition<S>>) -> Result<Self, ConfigError> {
        if steps.is_empty() {
            return Err(ConfigError::Empty);
        }

        let mut seen = HashSet::new();
        for step in &steps {
            if !seen.insert(step.id) {
                return Err(ConfigError::DuplicateStepId {
                    id: step.id.as_str().to_string(),
                });
            }
            if step.progress_percent > 100 {
                return Err(ConfigError::ProgressOutOfRange {
                    id: step.id.as_str().to_string(),
                    percent: step.progress_percent,
                });
            }
        }

        steps.sort_by_key(|step| step.order);
        for pair in steps.windows(2) {
            if pair[0].order == pair[1].order {
                return Err(ConfigError::DuplicateOrder {
                    order: pair[0].order,
                    first: pair[0].id.as_str().to_string(),
                    second: pair[1].id.as_str().to_string(),
                });
            }
        }

        Ok(Self { steps })
    }

    pub fn first(&self) -> &StepDefinition<S> {
        &self.steps[0]
    }

    pub fn terminal(&self) -> &StepDefinition<S> {
        &self.steps[self.steps.len() - 1]
    }

    pub fn is_terminal(&self, id: S) -> bool {
        self.terminal().id == id
    }

    pub fn get(&self, id: S) -> Option<&StepDefinition<S>> {
        self.steps.iter().find(|step| step.id == id)
    }

    pub fn contains(&self, id: S) -> bool {
        self.get(id).is_some()
    }

    /// Step following `id` in the canonical sequence.
    pub fn next_after(&self, id: S) -> Option<&StepDefinition<S>> {
        let index = self.steps.iter().position(|step| step.id == id)?;
        self.steps.get(index + 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StepDefinition<S>> {
        self.steps.iter()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
