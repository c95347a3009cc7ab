use std::sync::Arc;

use anyhow::{Context, Result};

use gs_core::application::Application;
use gs_core::ports::ApplicationRepositoryPort;

/// Case-insensitive search on service name, id and tracking number.
pub struct SearchApplications {
    repo: Arc<dyn ApplicationRepositoryPort>,
}

impl SearchApplications {
    pub fn new(repo: Arc<dyn ApplicationRepositoryPort>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, query: &str) -> Result<Vec<Application>> {
        let applications = self
            .repo
            .list()
            .await
            .context("failed to list applications")?;
        Ok(applications
            .into_iter()
            .filter(|app| app.matches(query))
            .collect())
    }
}
