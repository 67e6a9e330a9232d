//! Status counts and the alert feed for a set of checks.

use serde::Serialize;

use super::model::PeriodicCheck;
use super::status::CheckStatus;
use crate::types::DbId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub total: usize,
    pub upcoming: usize,
    pub warning_month: usize,
    pub warning_week: usize,
    pub late: usize,
    pub completed: usize,
    /// `LATE` and `WARNING_WEEK` checks, most urgent first, then soonest due.
    pub alert_ids: Vec<DbId>,
}

impl StatusSummary {
    /// Tally `checks` by their current `status` field. Callers pass checks
    /// whose status has already been refreshed.
    pub fn from_checks(checks: &[PeriodicCheck]) -> Self {
        let mut summary = Self {
            total: checks.len(),
            ..Self::default()
        };
        for check in checks {
            match check.status {
                CheckStatus::Upcoming => summary.upcoming += 1,
                CheckStatus::WarningMonth => summary.warning_month += 1,
                CheckStatus::WarningWeek => summary.warning_week += 1,
                CheckStatus::Late => summary.late += 1,
                CheckStatus::Completed => summary.completed += 1,
            }
        }

        let mut alerts: Vec<&PeriodicCheck> =
            checks.iter().filter(|c| c.status.is_alert()).collect();
        alerts.sort_by(|a, b| {
            b.status
                .urgency()
                .cmp(&a.status.urgency())
                .then(a.next_due_date.cmp(&b.next_due_date))
                .then(a.id.cmp(&b.id))
        });
        summary.alert_ids = alerts.into_iter().map(|c| c.id).collect();
        summary
    }
}
