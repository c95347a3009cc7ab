//! In-memory application repository.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use gs_core::application::{Application, ApplicationKind, TrackingNumber};
use gs_core::ports::ApplicationRepositoryPort;

#[derive(Default)]
pub struct InMemoryApplicationRepository {
    applications: RwLock<HashMap<TrackingNumber, Application>>,
    sequences: Mutex<HashMap<(ApplicationKind, i32), u32>>,
}

impl InMemoryApplicationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApplicationRepositoryPort for InMemoryApplicationRepository {
    async fn save(&self, application: &Application) -> anyhow::Result<()> {
        self.applications
            .write()
            .await
            .insert(application.tracking_number.clone(), application.clone());
        Ok(())
    }

    async fn find_by_tracking_number(
        &self,
        tracking_number: &TrackingNumber,
    ) -> anyhow::Result<Option<Application>> {
        Ok(self.applications.read().await.get(tracking_number).cloned())
    }

    async fn list(&self) -> anyhow::Result<Vec<Application>> {
        let mut applications: Vec<_> = self.applications.read().await.values().cloned().collect();
        applications.sort_by(|a, b| {
            b.submitted_at
                .cmp(&a.submitted_at)
                .then_with(|| b.tracking_number.cmp(&a.tracking_number))
        });
        Ok(applications)
    }

    async fn next_sequence(&self, kind: ApplicationKind, year: i32) -> anyhow::Result<u32> {
        let mut sequences = self.sequences.lock().await;
        let next = sequences.entry((kind, year)).or_insert(0);
        *next += 1;
        Ok(*next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn application(number: u32, age_days: i64) -> Application {
        Application::new(
            ApplicationKind::DrivingLicense,
            TrackingNumber::new("DL", 2024, number),
            Vec::new(),
            62_540,
            Utc::now() - Duration::days(age_days),
        )
    }

    #[tokio::test]
    async fn sequences_are_per_kind_and_year() {
        let repo = InMemoryApplicationRepository::new();
        assert_eq!(repo.next_sequence(ApplicationKind::DrivingLicense, 2024).await.unwrap(), 1);
        assert_eq!(repo.next_sequence(ApplicationKind::DrivingLicense, 2024).await.unwrap(), 2);
        assert_eq!(repo.next_sequence(ApplicationKind::Passport, 2024).await.unwrap(), 1);
        assert_eq!(repo.next_sequence(ApplicationKind::DrivingLicense, 2025).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn list_orders_newest_first() {
        let repo = InMemoryApplicationRepository::new();
        repo.save(&application(1, 10)).await.unwrap();
        repo.save(&application(2, 1)).await.unwrap();
        repo.save(&application(3, 5)).await.unwrap();

        let numbers: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|app| app.tracking_number.to_string())
            .collect();
        assert_eq!(numbers, vec!["DL2024002", "DL2024003", "DL2024001"]);
    }

    #[tokio::test]
    async fn save_replaces_by_tracking_number() {
        let repo = InMemoryApplicationRepository::new();
        let mut app = application(1, 0);
        repo.save(&app).await.unwrap();
        app.documents.push("photo".into());
        repo.save(&app).await.unwrap();

        let stored = repo
            .find_by_tracking_number(&app.tracking_number)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.documents, vec!["photo".to_string()]);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }
}
