use async_trait::async_trait;

use crate::application::{Application, ApplicationKind, TrackingNumber};

#[async_trait]
pub trait ApplicationRepositoryPort: Send + Sync {
    /// Insert or replace by tracking number.
    async fn save(&self, application: &Application) -> anyhow::Result<()>;

    async fn find_by_tracking_number(
        &self,
        tracking_number: &TrackingNumber,
    ) -> anyhow::Result<Option<Application>>;

    /// Most recently submitted first.
    async fn list(&self) -> anyhow::Result<Vec<Application>>;

    /// Reserves the next tracking sequence for `kind` in `year`, starting at 1.
    async fn next_sequence(&self, kind: ApplicationKind, year: i32) -> anyhow::Result<u32>;
}
