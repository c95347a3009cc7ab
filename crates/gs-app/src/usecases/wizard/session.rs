use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, info_span, warn, Instrument};

use gs_core::config::SimulatorConfig;
use gs_core::ports::WizardEventPort;
use gs_core::{
    ActionId, ActionKind, ActionRequest, FormAccumulator, GuardError, SessionId, StepId,
    StepTable, WizardAction, WizardEvent, WizardSnapshot, WizardState, WizardStateMachine,
};

use super::{Completion, CompletionHandler, WizardSessionError};
use crate::usecases::actions::{ActionRunner, PendingAction};

/// Result of a successful [`WizardSession::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome<S: StepId> {
    /// The cursor moved to the next step.
    Advanced(WizardState<S>),
    /// The terminal step was submitted and the hand-off succeeded.
    Completed(Completion),
}

/// One user's pass through a flow.
///
/// ## Lock Ordering
/// `dispatch_lock` first, then `machine`, then `authoritative`.
/// - `dispatch_lock` serializes every transition. It is released while a step
///   action is awaited so back-navigation can cancel it.
/// - `authoritative` maps a step to the single action whose result may still
///   complete it.
pub struct WizardSession<S: StepId> {
    id: SessionId,
    machine: Mutex<WizardStateMachine<S>>,
    dispatch_lock: Mutex<()>,
    authoritative: Mutex<HashMap<S, ActionId>>,
    finished: AtomicBool,
    runner: Arc<ActionRunner>,
    latency: SimulatorConfig,
    events: Arc<dyn WizardEventPort>,
    completion: Arc<dyn CompletionHandler>,
}

impl<S: StepId> WizardSession<S> {
    pub fn new(
        table: StepTable<S>,
        runner: Arc<ActionRunner>,
        latency: SimulatorConfig,
        events: Arc<dyn WizardEventPort>,
        completion: Arc<dyn CompletionHandler>,
    ) -> Self {
        Self {
            id: SessionId::new(),
            machine: Mutex::new(WizardStateMachine::new(table)),
            dispatch_lock: Mutex::new(()),
            authoritative: Mutex::new(HashMap::new()),
            finished: AtomicBool::new(false),
            runner,
            latency,
            events,
            completion,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }

    pub async fn state(&self) -> WizardState<S> {
        self.machine.lock().await.state().clone()
    }

    pub async fn current_step(&self) -> S {
        self.machine.lock().await.state().current()
    }

    pub async fn snapshot(&self) -> WizardSnapshot {
        let machine = self.machine.lock().await;
        WizardSnapshot::capture(machine.table(), machine.state())
    }

    /// Submits the current step's partial update.
    ///
    /// When the step requires an action it is run first; only its success can
    /// complete the step. A failed guard or action leaves the state untouched.
    /// Action completion flags in `partial` are dropped: only the session sets
    /// them.
    pub async fn submit(
        &self,
        partial: FormAccumulator,
    ) -> Result<StepOutcome<S>, WizardSessionError> {
        let span = info_span!(
            "usecase.wizard_session.submit",
            session_id = %self.id,
            flow = S::FLOW
        );
        async move {
            let partial = strip_completion_flags(partial);
            let dispatch = self.dispatch_lock.lock().await;
            self.ensure_open()?;

            let (step, action, merged) = {
                let machine = self.machine.lock().await;
                let current = machine.current();
                let merged = machine.state().accumulator().merge(&partial);
                let step = current.id();
                match current.action() {
                    Some(_) if !current.is_ready_for_action(&merged) => {
                        debug!(step = step.as_str(), "step incomplete; action not issued");
                        return Err(GuardError::StepIncomplete {
                            step: step.as_str().to_string(),
                        }
                        .into());
                    }
                    Some(kind)
                        if partial.is_empty()
                            && merged.flag(kind.completion_field())
                            && current.is_complete(&merged) =>
                    {
                        debug!(step = step.as_str(), action = %kind, "action already satisfied");
                        (step, None, merged)
                    }
                    action => (step, action, merged),
                }
            };

            let Some(kind) = action else {
                return self.commit(partial).await;
            };

            let pending = self.issue(step, kind, merged).await;
            drop(dispatch);

            let action_id = pending.id().clone();
            let outcome = pending.outcome().await;

            let _dispatch = self.dispatch_lock.lock().await;
            let authoritative = self.take_if_authoritative(step, &action_id).await;
            match outcome {
                None if authoritative => Err(WizardSessionError::Cancelled { kind }),
                None => {
                    if self.authoritative.lock().await.contains_key(&step) {
                        Err(WizardSessionError::Superseded { kind })
                    } else {
                        Err(WizardSessionError::Cancelled { kind })
                    }
                }
                Some(_) if !authoritative => {
                    debug!(step = step.as_str(), action_id = %action_id, "stale action result ignored");
                    Err(WizardSessionError::Superseded { kind })
                }
                Some(Err(failure)) => {
                    warn!(step = step.as_str(), action = %kind, ?failure, "step action failed");
                    Err(WizardSessionError::Action { kind, failure })
                }
                Some(Ok(_)) => {
                    if self.current_step().await != step {
                        return Err(WizardSessionError::Superseded { kind });
                    }
                    self.commit(partial.with(kind.completion_field(), true)).await
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Re-issues the current step's resend action, superseding whatever was
    /// pending for the step.
    pub async fn resend(&self) -> Result<(), WizardSessionError> {
        let span = info_span!("usecase.wizard_session.resend", session_id = %self.id);
        async move {
            let dispatch = self.dispatch_lock.lock().await;
            self.ensure_open()?;

            let (step, kind, payload) = {
                let machine = self.machine.lock().await;
                let current = machine.current();
                let kind = current
                    .resend()
                    .ok_or_else(|| WizardSessionError::NothingToResend {
                        step: current.id().as_str().to_string(),
                    })?;
                (current.id(), kind, machine.state().accumulator().clone())
            };

            let pending = self.issue(step, kind, payload).await;
            drop(dispatch);

            let action_id = pending.id().clone();
            let outcome = pending.outcome().await;
            let _dispatch = self.dispatch_lock.lock().await;
            let authoritative = self.take_if_authoritative(step, &action_id).await;
            match outcome {
                None if authoritative => Err(WizardSessionError::Cancelled { kind }),
                None => Err(WizardSessionError::Superseded { kind }),
                Some(Err(failure)) => Err(WizardSessionError::Action { kind, failure }),
                Some(Ok(_)) => {
                    info!(step = step.as_str(), action = %kind, "resend succeeded");
                    Ok(())
                }
            }
        }
        .instrument(span)
        .await
    }

    pub async fn previous(&self) -> Result<WizardState<S>, WizardSessionError> {
        self.navigate(WizardEvent::Previous).await
    }

    pub async fn go_to(&self, target: S) -> Result<WizardState<S>, WizardSessionError> {
        self.navigate(WizardEvent::GoTo { target }).await
    }

    /// Starts over at the first step. Also re-opens a finished session.
    pub async fn reset(&self) -> WizardState<S> {
        let _dispatch = self.dispatch_lock.lock().await;
        let (state, actions) = {
            let mut machine = self.machine.lock().await;
            match machine.dispatch(WizardEvent::Reset) {
                Ok(result) => result,
                Err(_) => (machine.reset(), Vec::new()),
            }
        };
        self.finished.store(false, Ordering::SeqCst);
        info!(session_id = %self.id, "wizard reset");
        if let Err(err) = self.execute_actions(actions).await {
            warn!(error = %err, "reset side-effect failed");
        }
        self.emit().await;
        state
    }

    async fn navigate(&self, event: WizardEvent<S>) -> Result<WizardState<S>, WizardSessionError> {
        let _dispatch = self.dispatch_lock.lock().await;
        self.ensure_open()?;
        let (state, _) = self.apply(event).await?;
        Ok(state)
    }

    /// Moves forward with `partial`, or completes the flow at the terminal
    /// step. Caller holds `dispatch_lock`.
    async fn commit(&self, partial: FormAccumulator) -> Result<StepOutcome<S>, WizardSessionError> {
        let terminal = self.machine.lock().await.is_terminal();
        let event = if terminal {
            WizardEvent::Complete { partial }
        } else {
            WizardEvent::Next { partial }
        };

        let (state, completion) = self.apply(event).await?;
        match completion {
            Some(completion) => Ok(StepOutcome::Completed(completion)),
            None => Ok(StepOutcome::Advanced(state)),
        }
    }

    /// Dispatches `event` on the machine and carries out the resulting
    /// actions. Caller holds `dispatch_lock`.
    async fn apply(
        &self,
        event: WizardEvent<S>,
    ) -> Result<(WizardState<S>, Option<Completion>), WizardSessionError> {
        let (from, result) = {
            let mut machine = self.machine.lock().await;
            let from = machine.state().current();
            (from, machine.dispatch(event))
        };

        let (state, actions) = match result {
            Ok(result) => result,
            Err(err) => {
                debug!(step = from.as_str(), error = %err, "wizard transition rejected");
                return Err(err.into());
            }
        };
        info!(
            from = from.as_str(),
            to = state.current().as_str(),
            "wizard state transition"
        );

        let completion = self.execute_actions(actions).await?;
        self.emit().await;
        Ok((state, completion))
    }

    async fn execute_actions(
        &self,
        actions: Vec<WizardAction<S>>,
    ) -> Result<Option<Completion>, WizardSessionError> {
        let mut completion = None;
        for action in actions {
            match action {
                WizardAction::CancelPendingAction { step } => {
                    let pending = self.authoritative.lock().await.remove(&step);
                    if let Some(id) = pending {
                        if self.runner.cancel(&id).await {
                            info!(step = step.as_str(), action_id = %id, "pending action cancelled");
                        }
                    }
                }
                WizardAction::DiscardAccumulator => {
                    debug!(session_id = %self.id, "accumulator discarded");
                }
                WizardAction::HandOff { accumulator } => {
                    let done = self
                        .completion
                        .complete(&self.id, accumulator)
                        .await
                        .map_err(WizardSessionError::HandOff)?;
                    self.finished.store(true, Ordering::SeqCst);
                    info!(session_id = %self.id, flow = S::FLOW, "wizard completed");
                    completion = Some(done);
                }
            }
        }
        Ok(completion)
    }

    /// Starts `kind` for `step`, cancelling the step's previous authoritative
    /// action if any.
    async fn issue(&self, step: S, kind: ActionKind, payload: FormAccumulator) -> PendingAction {
        let request = ActionRequest::new(kind, payload, self.latency.latency_for(kind));
        let mut authoritative = self.authoritative.lock().await;
        if let Some(previous) = authoritative.remove(&step) {
            if self.runner.cancel(&previous).await {
                info!(step = step.as_str(), action_id = %previous, "pending action superseded");
            }
        }
        let pending = self.runner.start(request).await;
        debug!(step = step.as_str(), action = %kind, action_id = %pending.id(), "action issued");
        authoritative.insert(step, pending.id().clone());
        pending
    }

    async fn take_if_authoritative(&self, step: S, id: &ActionId) -> bool {
        let mut authoritative = self.authoritative.lock().await;
        if authoritative.get(&step) == Some(id) {
            authoritative.remove(&step);
            true
        } else {
            false
        }
    }

    async fn emit(&self) {
        let snapshot = self.snapshot().await;
        self.events.emit_state_changed(snapshot).await;
    }

    fn ensure_open(&self) -> Result<(), WizardSessionError> {
        if self.is_finished() {
            Err(WizardSessionError::AlreadyCompleted)
        } else {
            Ok(())
        }
    }
}

fn strip_completion_flags(partial: FormAccumulator) -> FormAccumulator {
    let flags = ActionKind::ALL.map(|kind| kind.completion_field());
    if !flags.iter().any(|flag| partial.contains(flag)) {
        return partial;
    }
    warn!(?flags, "client-supplied completion flags dropped");
    partial.without(flags)
}
