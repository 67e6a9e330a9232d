//! Periodic-check status derivation.
//!
//! A check's status is a pure function of its next due date, the current
//! date and whether its checklist is fully ticked. The stored value is a
//! cache refreshed on every read.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Last day-distance (inclusive) that counts as due this week.
pub const WARNING_WEEK_DAYS: i64 = 7;

/// Last day-distance (inclusive) that counts as due this month.
pub const WARNING_MONTH_DAYS: i64 = 30;

// ---------------------------------------------------------------------------
// CheckStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckStatus {
    Upcoming,
    WarningMonth,
    WarningWeek,
    Late,
    Completed,
}

impl CheckStatus {
    pub const ALL: [CheckStatus; 5] = [
        CheckStatus::Upcoming,
        CheckStatus::WarningMonth,
        CheckStatus::WarningWeek,
        CheckStatus::Late,
        CheckStatus::Completed,
    ];

    /// Return the database string representation.
    pub fn name(self) -> &'static str {
        match self {
            Self::Upcoming => "UPCOMING",
            Self::WarningMonth => "WARNING_MONTH",
            Self::WarningWeek => "WARNING_WEEK",
            Self::Late => "LATE",
            Self::Completed => "COMPLETED",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| CoreError::Validation(format!("Unknown check status '{name}'")))
    }

    /// Urgency rank: higher needs attention sooner. `Completed` ranks lowest.
    pub fn urgency(self) -> u8 {
        match self {
            Self::Late => 4,
            Self::WarningWeek => 3,
            Self::WarningMonth => 2,
            Self::Upcoming => 1,
            Self::Completed => 0,
        }
    }

    /// `Late` and `WarningWeek` feed the alert list.
    pub fn is_alert(self) -> bool {
        matches!(self, Self::Late | Self::WarningWeek)
    }
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Whole days from `today` until `next_due_date`. Negative when overdue.
pub fn days_until_due(next_due_date: NaiveDate, today: NaiveDate) -> i64 {
    (next_due_date - today).num_days()
}

/// Date-derived status. Never returns `Completed`.
///
/// | days until due | status          |
/// |----------------|-----------------|
/// | `< 0`          | `Late`          |
/// | `0..=7`        | `WarningWeek`   |
/// | `8..=30`       | `WarningMonth`  |
/// | `> 30`         | `Upcoming`      |
pub fn derive_status(next_due_date: NaiveDate, today: NaiveDate) -> CheckStatus {
    match days_until_due(next_due_date, today) {
        d if d < 0 => CheckStatus::Late,
        d if d <= WARNING_WEEK_DAYS => CheckStatus::WarningWeek,
        d if d <= WARNING_MONTH_DAYS => CheckStatus::WarningMonth,
        _ => CheckStatus::Upcoming,
    }
}

/// Status including the checklist override: a fully ticked checklist is
/// `Completed` regardless of the date.
pub fn resolve_status(next_due_date: NaiveDate, all_checked: bool, today: NaiveDate) -> CheckStatus {
    if all_checked {
        CheckStatus::Completed
    } else {
        derive_status(next_due_date, today)
    }
}
