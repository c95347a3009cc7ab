use std::sync::Arc;

use anyhow::{Context, Result};

use gs_core::application::{Application, ApplicationStatus};
use gs_core::ports::ApplicationRepositoryPort;

/// Lists applications, optionally only those in one status.
pub struct ListApplications {
    repo: Arc<dyn ApplicationRepositoryPort>,
}

impl ListApplications {
    pub fn new(repo: Arc<dyn ApplicationRepositoryPort>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, status: Option<ApplicationStatus>) -> Result<Vec<Application>> {
        let applications = self
            .repo
            .list()
            .await
            .context("failed to list applications")?;
        Ok(match status {
            Some(status) => applications
                .into_iter()
                .filter(|app| app.status == status)
                .collect(),
            None => applications,
        })
    }
}
