use async_trait::async_trait;

use crate::action::{ActionOutcome, ActionRequest};

/// Executes one out-of-process action.
///
/// Implementations honor `request.latency` and resolve exactly once. They do
/// not need to handle cancellation: the caller drops or aborts the future.
#[async_trait]
pub trait ActionBackendPort: Send + Sync {
    async fn execute(&self, request: ActionRequest) -> ActionOutcome;
}
