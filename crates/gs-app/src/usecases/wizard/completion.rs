use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use gs_core::application::Application;
use gs_core::ports::{ClockPort, SessionResultSinkPort};
use gs_core::session::SessionResult;
use gs_core::{FormAccumulator, SessionId};

/// What a finished wizard produced downstream.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Onboarding finished and the session result was stored.
    Onboarded(SessionResult),
    /// A license application was filed.
    Submitted(Application),
    /// No downstream consumer; the final accumulator as-is.
    Finished(FormAccumulator),
}

/// Receives the final accumulator of a wizard.
#[async_trait]
pub trait CompletionHandler: Send + Sync {
    async fn complete(
        &self,
        session_id: &SessionId,
        accumulator: FormAccumulator,
    ) -> anyhow::Result<Completion>;
}

/// Hands the accumulator back unchanged. Used by flows whose result the host
/// consumes directly (payment, document upload).
pub struct KeepAccumulator;

#[async_trait]
impl CompletionHandler for KeepAccumulator {
    async fn complete(
        &self,
        _session_id: &SessionId,
        accumulator: FormAccumulator,
    ) -> anyhow::Result<Completion> {
        Ok(Completion::Finished(accumulator))
    }
}

/// Converts a finished onboarding into a [`SessionResult`] and persists it.
pub struct StoreSessionResult {
    sink: Arc<dyn SessionResultSinkPort>,
    clock: Arc<dyn ClockPort>,
}

impl StoreSessionResult {
    pub fn new(sink: Arc<dyn SessionResultSinkPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { sink, clock }
    }
}

#[async_trait]
impl CompletionHandler for StoreSessionResult {
    async fn complete(
        &self,
        session_id: &SessionId,
        accumulator: FormAccumulator,
    ) -> anyhow::Result<Completion> {
        let result =
            SessionResult::from_accumulator(session_id.clone(), &accumulator, self.clock.now())?;

        if let Err(err) = self.sink.store(&result).await {
            error!(session_id = %session_id, error = %err, "failed to store session result");
            return Err(err);
        }

        info!(session_id = %session_id, "session result stored");
        Ok(Completion::Onboarded(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use gs_core::FieldValue;
    use mockall::mock;

    mock! {
        Sink {}

        #[async_trait]
        impl SessionResultSinkPort for Sink {
            async fn store(&self, result: &SessionResult) -> anyhow::Result<()>;
        }
    }

    struct FixedClock;

    impl ClockPort for FixedClock {
        fn now(&self) -> chrono::DateTime<Utc> {
            Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
        }
    }

    fn onboarded() -> FormAccumulator {
        FormAccumulator::new()
            .with("phone", "9876543210")
            .with("phone_verified", true)
            .with("aadhaar", "123456789012")
            .with("aadhaar_verified", true)
            .with(
                "profile",
                FieldValue::object([
                    ("full_name", "Rahul Sharma"),
                    ("email", "rahul@example.com"),
                    ("date_of_birth", "1990-04-12"),
                    ("address", "123 Main Street"),
                ]),
            )
            .with("biometric_method", "pin")
    }

    #[tokio::test]
    async fn stores_converted_result() {
        let mut sink = MockSink::new();
        sink.expect_store()
            .withf(|result| result.phone == "9876543210" && result.biometric_method == "pin")
            .times(1)
            .returning(|_| Ok(()));
        let handler = StoreSessionResult::new(Arc::new(sink), Arc::new(FixedClock));

        let completion = handler
            .complete(&SessionId::from("s-1"), onboarded())
            .await
            .unwrap();
        match completion {
            Completion::Onboarded(result) => {
                assert_eq!(result.session_id, SessionId::from("s-1"));
                assert_eq!(result.completed_at, FixedClock.now());
            }
            other => panic!("unexpected completion: {other:?}"),
        }
    }

    #[tokio::test]
    async fn sink_failure_is_returned() {
        let mut sink = MockSink::new();
        sink.expect_store()
            .returning(|_| Err(anyhow::anyhow!("disk full")));
        let handler = StoreSessionResult::new(Arc::new(sink), Arc::new(FixedClock));

        let err = handler
            .complete(&SessionId::new(), onboarded())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("disk full"));
    }

    #[tokio::test]
    async fn incomplete_accumulator_never_reaches_sink() {
        let mut sink = MockSink::new();
        sink.expect_store().times(0);
        let handler = StoreSessionResult::new(Arc::new(sink), Arc::new(FixedClock));

        let acc = onboarded().with("biometric_method", FieldValue::Bool(false));
        assert!(handler.complete(&SessionId::new(), acc).await.is_err());
    }
}
