use async_trait::async_trait;
use tokio::time::sleep;
use tracing::{debug, info};

use gs_core::config::SimulatorConfig;
use gs_core::ports::ActionBackendPort;
use gs_core::{ActionOutcome, ActionRequest};

/// Resolves every request after its latency, judged by the acceptance rule
/// configured for its kind. Holds no per-request state, so any number of
/// requests may be outstanding at once.
pub struct SimulatedBackend {
    config: SimulatorConfig,
}

impl SimulatedBackend {
    pub fn new(config: SimulatorConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ActionBackendPort for SimulatedBackend {
    async fn execute(&self, request: ActionRequest) -> ActionOutcome {
        debug!(action_id = %request.id, kind = %request.kind, "simulated request started");
        if request.latency.is_zero() {
            tokio::task::yield_now().await;
        } else {
            sleep(request.latency).await;
        }

        let rule = self.config.accept_rule_for(request.kind);
        match rule.evaluate(&request.payload) {
            Ok(()) => {
                info!(action_id = %request.id, kind = %request.kind, "simulated request accepted");
                Ok(request.payload)
            }
            Err(failure) => {
                info!(
                    action_id = %request.id,
                    kind = %request.kind,
                    ?failure,
                    "simulated request failed"
                );
                Err(failure)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use gs_core::{ActionKind, AsyncFailure, FormAccumulator};

    fn backend() -> SimulatedBackend {
        SimulatedBackend::new(SimulatorConfig::default())
    }

    fn request(kind: ActionKind, payload: FormAccumulator, ms: u64) -> ActionRequest {
        ActionRequest::new(kind, payload, Duration::from_millis(ms))
    }

    #[tokio::test]
    async fn waits_for_latency_before_resolving() {
        tokio::time::pause();
        let backend = backend();
        let payload = FormAccumulator::new().with("otp", "123456");
        let start = tokio::time::Instant::now();

        let outcome = backend
            .execute(request(ActionKind::VerifyOtp, payload.clone(), 2_000))
            .await;

        assert_eq!(outcome, Ok(payload));
        assert!(start.elapsed() >= Duration::from_millis(2_000));
    }

    #[tokio::test]
    async fn wrong_otp_is_rejected() {
        let outcome = backend()
            .execute(request(
                ActionKind::VerifyOtp,
                FormAccumulator::new().with("otp", "000000"),
                0,
            ))
            .await;
        assert_eq!(outcome, Err(AsyncFailure::RejectedByBackend));
    }

    #[tokio::test]
    async fn malformed_aadhaar_is_invalid_format() {
        let outcome = backend()
            .execute(request(
                ActionKind::VerifyAadhaar,
                FormAccumulator::new().with("aadhaar", "1234"),
                0,
            ))
            .await;
        assert_eq!(outcome, Err(AsyncFailure::InvalidFormat));
    }

    #[tokio::test]
    async fn spaced_aadhaar_matches_accepted_value() {
        let outcome = backend()
            .execute(request(
                ActionKind::VerifyAadhaar,
                FormAccumulator::new().with("aadhaar", "1234 5678 9012"),
                0,
            ))
            .await;
        assert!(outcome.is_ok());
    }

    #[tokio::test]
    async fn payment_is_always_accepted() {
        let outcome = backend()
            .execute(request(ActionKind::ProcessPayment, FormAccumulator::new(), 0))
            .await;
        assert!(outcome.is_ok());
    }
}
