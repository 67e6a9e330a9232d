//! Periodic check entity and the inputs that create or replace it.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::checklist::{self, ChecklistItem, ChecklistItemInput};
use super::status::{resolve_status, CheckStatus};
use crate::trade::Trade;
use crate::types::{DbId, Timestamp};

/// A recurring inspection obligation tied to one club and one space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodicCheck {
    pub id: DbId,
    pub club_id: DbId,
    pub title: String,
    pub space: String,
    pub trade: Trade,
    pub frequency_months: i32,
    pub next_due_date: NaiveDate,
    pub last_checked: Option<NaiveDate>,
    pub checklist: Vec<ChecklistItem>,
    pub status: CheckStatus,
    pub history: Vec<HistoryEntry>,
    /// Set while the check sits in the recycle bin.
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PeriodicCheck {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn all_checked(&self) -> bool {
        checklist::all_checked(&self.checklist)
    }

    /// Status as of `today`, ignoring the cached value.
    pub fn resolved_status(&self, today: NaiveDate) -> CheckStatus {
        resolve_status(self.next_due_date, self.all_checked(), today)
    }

    /// Replace the cached status with the one valid on `today`.
    pub fn refresh_status(&mut self, today: NaiveDate) {
        self.status = self.resolved_status(today);
    }

    /// Proposed due date for the next cycle: one period after the last
    /// completion, or after the current due date if never completed.
    pub fn suggested_next_due_date(&self) -> Option<NaiveDate> {
        let base = self.last_checked.unwrap_or(self.next_due_date);
        let months = u32::try_from(self.frequency_months).ok()?;
        base.checked_add_months(Months::new(months))
    }
}

/// One completed inspection cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    pub technician_id: DbId,
    pub technician_name: String,
    pub status: CheckStatus,
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// DTO for creating a new check.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCheck {
    pub club_id: DbId,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 200))]
    pub space: String,
    pub trade: Trade,
    #[validate(range(min = 1, max = 120))]
    pub frequency_months: i32,
    pub next_due_date: NaiveDate,
    #[serde(default)]
    pub last_checked: Option<NaiveDate>,
    #[serde(default)]
    #[validate(nested)]
    pub checklist: Vec<ChecklistItemInput>,
}

/// DTO for replacing every editable field of a check.
///
/// History and the recycle-bin flag are not editable.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReplaceCheck {
    pub club_id: DbId,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 200))]
    pub space: String,
    pub trade: Trade,
    #[validate(range(min = 1, max = 120))]
    pub frequency_months: i32,
    pub next_due_date: NaiveDate,
    #[serde(default)]
    pub last_checked: Option<NaiveDate>,
    #[serde(default)]
    #[validate(nested)]
    pub checklist: Vec<ChecklistItemInput>,
}

impl ReplaceCheck {
    /// Overwrite the editable fields of `check` and recompute its status.
    pub fn apply_to(self, check: &mut PeriodicCheck, today: NaiveDate) {
        check.club_id = self.club_id;
        check.title = self.title;
        check.space = self.space;
        check.trade = self.trade;
        check.frequency_months = self.frequency_months;
        check.next_due_date = self.next_due_date;
        check.last_checked = self.last_checked;
        check.checklist = checklist::build_checklist(self.checklist);
        check.refresh_status(today);
    }
}

/// A validated check ready for insertion. The store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCheck {
    pub club_id: DbId,
    pub title: String,
    pub space: String,
    pub trade: Trade,
    pub frequency_months: i32,
    pub next_due_date: NaiveDate,
    pub last_checked: Option<NaiveDate>,
    pub checklist: Vec<ChecklistItem>,
    pub status: CheckStatus,
}

impl NewCheck {
    /// Build from a create DTO with fresh item ids and a derived status.
    pub fn from_create(input: CreateCheck, today: NaiveDate) -> Self {
        let checklist = checklist::build_checklist(input.checklist);
        let status = resolve_status(
            input.next_due_date,
            checklist::all_checked(&checklist),
            today,
        );
        Self {
            club_id: input.club_id,
            title: input.title,
            space: input.space,
            trade: input.trade,
            frequency_months: input.frequency_months,
            next_due_date: input.next_due_date,
            last_checked: input.last_checked,
            checklist,
            status,
        }
    }
}

/// Listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CheckFilter {
    pub club_id: Option<DbId>,
}

impl CheckFilter {
    pub fn for_club(club_id: DbId) -> Self {
        Self {
            club_id: Some(club_id),
        }
    }

    pub fn matches(&self, check: &PeriodicCheck) -> bool {
        self.club_id.map_or(true, |club_id| check.club_id == club_id)
    }
}
