use async_trait::async_trait;

use crate::session::SessionResult;

/// Durable hand-off of a finished onboarding. No retry semantics.
#[async_trait]
pub trait SessionResultSinkPort: Send + Sync {
    async fn store(&self, result: &SessionResult) -> anyhow::Result<()>;
}
