use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Datelike;
use tracing::{info, info_span, Instrument};

use gs_core::application::{Application, ApplicationKind, ApplicationStatus, TrackingNumber};
use gs_core::fees::FeeBreakdown;
use gs_core::flows::license;
use gs_core::ports::{ApplicationRepositoryPort, ClockPort};
use gs_core::{FormAccumulator, SessionId};

use crate::usecases::wizard::{Completion, CompletionHandler};

/// Files a new application and assigns its tracking number.
pub struct SubmitApplication {
    repo: Arc<dyn ApplicationRepositoryPort>,
    clock: Arc<dyn ClockPort>,
}

impl SubmitApplication {
    pub fn new(repo: Arc<dyn ApplicationRepositoryPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { repo, clock }
    }

    /// Creates the application. It starts as `PendingPayment` and moves
    /// straight to `Submitted` when the fee was already paid.
    pub async fn execute(
        &self,
        kind: ApplicationKind,
        documents: Vec<String>,
        fee: FeeBreakdown,
        payment_confirmed: bool,
    ) -> Result<Application> {
        let span = info_span!("usecase.submit_application.execute", kind = ?kind);
        async move {
            let now = self.clock.now();
            let sequence = self
                .repo
                .next_sequence(kind, now.year())
                .await
                .context("failed to reserve tracking sequence")?;
            let tracking_number =
                TrackingNumber::new(kind.tracking_prefix(), now.year(), sequence);

            let mut application =
                Application::new(kind, tracking_number, documents, fee.total_paise(), now);
            if payment_confirmed {
                application.advance(ApplicationStatus::Submitted, now, None)?;
            }

            self.repo
                .save(&application)
                .await
                .context("failed to save application")?;
            info!(
                tracking_number = %application.tracking_number,
                status = %application.status,
                "application submitted"
            );
            Ok(application)
        }
        .instrument(span)
        .await
    }

    /// Files a driving license application from a completed license wizard.
    pub async fn from_license(&self, accumulator: &FormAccumulator) -> Result<Application> {
        let missing = license::missing_documents(accumulator);
        if !missing.is_empty() {
            anyhow::bail!("license application is missing documents: {}", missing.join(", "));
        }
        let documents = license::REQUIRED_DOCUMENTS
            .iter()
            .map(|doc| doc.to_string())
            .collect();
        self.execute(
            ApplicationKind::DrivingLicense,
            documents,
            FeeBreakdown::driving_license(),
            accumulator.flag(license::fields::PAYMENT_CONFIRMED),
        )
        .await
    }
}

#[async_trait]
impl CompletionHandler for SubmitApplication {
    async fn complete(
        &self,
        _session_id: &SessionId,
        accumulator: FormAccumulator,
    ) -> Result<Completion> {
        self.from_license(&accumulator)
            .await
            .map(Completion::Submitted)
    }
}
