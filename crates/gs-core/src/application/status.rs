use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    PendingPayment,
    Submitted,
    Reviewing,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 5] = [
        ApplicationStatus::PendingPayment,
        ApplicationStatus::Submitted,
        ApplicationStatus::Reviewing,
        ApplicationStatus::Approved,
        ApplicationStatus::Rejected,
    ];

    pub fn can_transition_to(&self, next: ApplicationStatus) -> bool {
        use ApplicationStatus::*;
        matches!(
            (self, next),
            (PendingPayment, Submitted)
                | (Submitted, Reviewing)
                | (Reviewing, Approved)
                | (Reviewing, Rejected)
        )
    }

    pub fn is_final(&self) -> bool {
        matches!(self, ApplicationStatus::Approved | ApplicationStatus::Rejected)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::PendingPayment => "pending_payment",
            ApplicationStatus::Submitted => "submitted",
            ApplicationStatus::Reviewing => "reviewing",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == value)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of an application's status timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub status: ApplicationStatus,
    pub at: DateTime<Utc>,
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_forward_lifecycle_edges_are_allowed() {
        let allowed: Vec<_> = ApplicationStatus::ALL
            .into_iter()
            .flat_map(|from| {
                ApplicationStatus::ALL
                    .into_iter()
                    .filter(move |to| from.can_transition_to(*to))
                    .map(move |to| (from, to))
            })
            .collect();
        assert_eq!(allowed.len(), 4);
        assert!(ApplicationStatus::ALL
            .iter()
            .filter(|s| s.is_final())
            .all(|s| ApplicationStatus::ALL.iter().all(|to| !s.can_transition_to(*to))));
    }

    #[test]
    fn parse_round_trips_wire_names() {
        assert_eq!(
            ApplicationStatus::parse("pending_payment"),
            Some(ApplicationStatus::PendingPayment)
        );
        assert_eq!(ApplicationStatus::parse("processing"), None);
    }
}
