use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{oneshot, Mutex};
use tokio::task::AbortHandle;
use tracing::{debug, info_span, Instrument};

use gs_core::ports::ActionBackendPort;
use gs_core::{ActionId, ActionKind, ActionOutcome, ActionRequest};

type Completion = Box<dyn FnOnce(ActionOutcome) + Send + 'static>;

/// Runs [`ActionRequest`]s on background tasks.
///
/// Each request is tracked until it either delivers its outcome or is
/// cancelled. Delivery and cancellation both remove the entry under the same
/// lock, so a cancelled action never reaches its completion callback.
pub struct ActionRunner {
    backend: Arc<dyn ActionBackendPort>,
    in_flight: Arc<Mutex<HashMap<ActionId, AbortHandle>>>,
}

impl ActionRunner {
    pub fn new(backend: Arc<dyn ActionBackendPort>) -> Self {
        Self {
            backend,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Starts `request` and calls `on_complete` once it resolves, unless the
    /// action is cancelled first.
    pub async fn start_with_callback<F>(&self, request: ActionRequest, on_complete: F) -> ActionId
    where
        F: FnOnce(ActionOutcome) + Send + 'static,
    {
        let id = request.id.clone();
        let on_complete: Completion = Box::new(on_complete);
        let backend = Arc::clone(&self.backend);
        let in_flight = Arc::clone(&self.in_flight);
        let span = info_span!(
            "action.run",
            action_id = %request.id,
            kind = %request.kind,
            latency_ms = request.latency.as_millis() as u64
        );

        // Hold the map lock across spawn so the task cannot finish before its
        // entry exists.
        let mut guard = self.in_flight.lock().await;
        let task_id = id.clone();
        let handle = tokio::spawn(
            async move {
                let outcome = backend.execute(request).await;
                let still_tracked = in_flight.lock().await.remove(&task_id).is_some();
                if still_tracked {
                    debug!(ok = outcome.is_ok(), "action resolved");
                    on_complete(outcome);
                } else {
                    debug!("action resolved after cancellation; outcome dropped");
                }
            }
            .instrument(span),
        );
        guard.insert(id.clone(), handle.abort_handle());
        id
    }

    /// Starts `request` and returns a handle to await its outcome.
    pub async fn start(&self, request: ActionRequest) -> PendingAction {
        let kind = request.kind;
        let (tx, rx) = oneshot::channel();
        let id = self
            .start_with_callback(request, move |outcome| {
                let _ = tx.send(outcome);
            })
            .await;
        PendingAction {
            id,
            kind,
            receiver: rx,
        }
    }

    /// Cancels `id`. Returns `false` when it already resolved or is unknown.
    pub async fn cancel(&self, id: &ActionId) -> bool {
        match self.in_flight.lock().await.remove(id) {
            Some(handle) => {
                handle.abort();
                debug!(action_id = %id, "action cancelled");
                true
            }
            None => false,
        }
    }

    pub async fn in_flight(&self) -> usize {
        self.in_flight.lock().await.len()
    }

    pub async fn is_in_flight(&self, id: &ActionId) -> bool {
        self.in_flight.lock().await.contains_key(id)
    }
}

/// Awaitable handle of one started action.
#[derive(Debug)]
pub struct PendingAction {
    id: ActionId,
    kind: ActionKind,
    receiver: oneshot::Receiver<ActionOutcome>,
}

impl PendingAction {
    pub fn id(&self) -> &ActionId {
        &self.id
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    /// Resolves with the outcome, or `None` when the action was cancelled.
    pub async fn outcome(self) -> Option<ActionOutcome> {
        self.receiver.await.ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use gs_core::{AsyncFailure, FormAccumulator};

    /// Sleeps for the request latency and rejects payloads carrying `reject`.
    struct SleepyBackend;

    #[async_trait]
    impl ActionBackendPort for SleepyBackend {
        async fn execute(&self, request: ActionRequest) -> ActionOutcome {
            tokio::time::sleep(request.latency).await;
            if request.payload.flag("reject") {
                Err(AsyncFailure::RejectedByBackend)
            } else {
                Ok(request.payload)
            }
        }
    }

    fn runner() -> ActionRunner {
        ActionRunner::new(Arc::new(SleepyBackend))
    }

    fn request(ms: u64, payload: FormAccumulator) -> ActionRequest {
        ActionRequest::new(ActionKind::VerifyOtp, payload, Duration::from_millis(ms))
    }

    #[tokio::test]
    async fn resolves_after_latency_with_payload() {
        tokio::time::pause();
        let runner = runner();
        let payload = FormAccumulator::new().with("otp", "123456");
        let pending = runner.start(request(2_000, payload.clone())).await;
        assert_eq!(runner.in_flight().await, 1);

        let outcome = pending.outcome().await;
        assert_eq!(outcome, Some(Ok(payload)));
        assert_eq!(runner.in_flight().await, 0);
    }

    #[tokio::test]
    async fn failures_are_delivered_as_values() {
        tokio::time::pause();
        let runner = runner();
        let pending = runner
            .start(request(10, FormAccumulator::new().with("reject", true)))
            .await;
        assert_eq!(
            pending.outcome().await,
            Some(Err(AsyncFailure::RejectedByBackend))
        );
    }

    #[tokio::test]
    async fn cancelled_action_never_calls_back() {
        tokio::time::pause();
        let runner = runner();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let id = runner
            .start_with_callback(request(1_000, FormAccumulator::new()), move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .await;

        tokio::time::advance(Duration::from_millis(500)).await;
        assert!(runner.cancel(&id).await);
        tokio::time::advance(Duration::from_millis(1_000)).await;
        tokio::task::yield_now().await;

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(!runner.cancel(&id).await);
    }

    #[tokio::test]
    async fn cancelled_pending_action_resolves_to_none() {
        tokio::time::pause();
        let runner = runner();
        let pending = runner.start(request(1_000, FormAccumulator::new())).await;
        runner.cancel(pending.id()).await;
        assert_eq!(pending.outcome().await, None);
    }

    #[tokio::test]
    async fn concurrent_actions_resolve_independently() {
        tokio::time::pause();
        let runner = runner();
        let slow = runner.start(request(3_000, FormAccumulator::new())).await;
        let fast = runner
            .start(request(500, FormAccumulator::new().with("reject", true)))
            .await;
        assert_eq!(runner.in_flight().await, 2);

        assert_eq!(fast.outcome().await, Some(Err(AsyncFailure::RejectedByBackend)));
        assert!(runner.is_in_flight(slow.id()).await);
        assert!(slow.outcome().await.is_some_and(|o| o.is_ok()));
    }

    #[tokio::test]
    async fn zero_latency_still_resolves_asynchronously() {
        let runner = runner();
        let pending = runner.start(request(0, FormAccumulator::new())).await;
        assert!(runner.is_in_flight(pending.id()).await);
        assert!(pending.outcome().await.is_some());
    }
}
