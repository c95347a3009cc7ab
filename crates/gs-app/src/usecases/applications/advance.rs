use std::sync::Arc;

use tracing::{info, info_span, Instrument};

use gs_core::application::{Application, ApplicationStatus, TrackingNumber};
use gs_core::ports::{ApplicationRepositoryPort, ClockPort};

use super::TrackApplicationError;

/// Moves an application along its review lifecycle.
pub struct AdvanceApplicationStatus {
    repo: Arc<dyn ApplicationRepositoryPort>,
    clock: Arc<dyn ClockPort>,
}

impl AdvanceApplicationStatus {
    pub fn new(repo: Arc<dyn ApplicationRepositoryPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { repo, clock }
    }

    pub async fn execute(
        &self,
        tracking_number: &str,
        to: ApplicationStatus,
        note: Option<String>,
    ) -> Result<Application, TrackApplicationError> {
        let span = info_span!(
            "usecase.advance_application_status.execute",
            tracking_number,
            to = %to
        );
        async move {
            let tracking_number = TrackingNumber::parse(tracking_number)?;
            let mut application = self
                .repo
                .find_by_tracking_number(&tracking_number)
                .await
                .map_err(TrackApplicationError::Repository)?
                .ok_or_else(|| TrackApplicationError::NotFound(tracking_number.clone()))?;

            let from = application.status;
            application.advance(to, self.clock.now(), note)?;
            self.repo
                .save(&application)
                .await
                .map_err(TrackApplicationError::Repository)?;

            info!(%tracking_number, from = %from, to = %to, "application status advanced");
            Ok(application)
        }
        .instrument(span)
        .await
    }
}
