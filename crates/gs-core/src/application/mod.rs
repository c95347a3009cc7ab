//! Submitted service applications and their review lifecycle.

mod status;
mod tracking;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::ApplicationId;

pub use status::{ApplicationStatus, StatusChange};
pub use tracking::TrackingNumber;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplicationError {
    #[error("application cannot move from {from} to {to}")]
    InvalidStatusTransition {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },
    #[error("malformed tracking number: {0}")]
    InvalidTrackingNumber(String),
}

/// Government service an application is filed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationKind {
    DrivingLicense,
    Passport,
    BirthCertificate,
    IncomeCertificate,
}

impl ApplicationKind {
    pub fn tracking_prefix(&self) -> &'static str {
        match self {
            ApplicationKind::DrivingLicense => "DL",
            ApplicationKind::Passport => "PP",
            ApplicationKind::BirthCertificate => "BC",
            ApplicationKind::IncomeCertificate => "IC",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ApplicationKind::DrivingLicense => "Driving License",
            ApplicationKind::Passport => "Passport",
            ApplicationKind::BirthCertificate => "Birth Certificate",
            ApplicationKind::IncomeCertificate => "Income Certificate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub kind: ApplicationKind,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub documents: Vec<String>,
    pub fee_paise: u64,
    pub tracking_number: TrackingNumber,
    pub status_history: Vec<StatusChange>,
}

impl Application {
    /// A new application awaiting payment.
    pub fn new(
        kind: ApplicationKind,
        tracking_number: TrackingNumber,
        documents: Vec<String>,
        fee_paise: u64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ApplicationId::new(),
            kind,
            status: ApplicationStatus::PendingPayment,
            submitted_at: now,
            last_updated: now,
            documents,
            fee_paise,
            tracking_number,
            status_history: vec![StatusChange {
                status: ApplicationStatus::PendingPayment,
                at: now,
                note: None,
            }],
        }
    }

    /// Moves to `to`, recording the change. Fails without side effects when
    /// the lifecycle does not allow it.
    pub fn advance(
        &mut self,
        to: ApplicationStatus,
        at: DateTime<Utc>,
        note: Option<String>,
    ) -> Result<(), ApplicationError> {
        if !self.status.can_transition_to(to) {
            return Err(ApplicationError::InvalidStatusTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        self.last_updated = at;
        self.status_history.push(StatusChange { status: to, at, note });
        Ok(())
    }

    /// Case-insensitive match on kind, id or tracking number.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.kind.label().to_lowercase().contains(&query)
            || self.id.as_str().to_lowercase().contains(&query)
            || self.tracking_number.as_str().to_lowercase().contains(&query)
    }
}
