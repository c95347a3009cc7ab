use std::sync::Arc;

use tracing::{debug, info_span, Instrument};

use gs_core::application::{Application, ApplicationError, TrackingNumber};
use gs_core::ports::ApplicationRepositoryPort;

#[derive(Debug, thiserror::Error)]
pub enum TrackApplicationError {
    #[error(transparent)]
    Invalid(#[from] ApplicationError),
    #[error("no application with tracking number {0}")]
    NotFound(TrackingNumber),
    #[error("application repository failed: {0}")]
    Repository(#[source] anyhow::Error),
}

/// Looks an application up by the tracking number the user typed.
pub struct TrackApplication {
    repo: Arc<dyn ApplicationRepositoryPort>,
}

impl TrackApplication {
    pub fn new(repo: Arc<dyn ApplicationRepositoryPort>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, tracking_number: &str) -> Result<Application, TrackApplicationError> {
        let span = info_span!("usecase.track_application.execute", tracking_number);
        async move {
            let tracking_number = TrackingNumber::parse(tracking_number)?;
            debug!(%tracking_number, "looking up application");
            self.repo
                .find_by_tracking_number(&tracking_number)
                .await
                .map_err(TrackApplicationError::Repository)?
                .ok_or(TrackApplicationError::NotFound(tracking_number))
        }
        .instrument(span)
        .await
    }
}
