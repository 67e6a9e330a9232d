//! Row model for the `periodic_checks` table.

use chrono::NaiveDate;
use clubcare_core::checks::{CheckStatus, ChecklistItem, HistoryEntry, PeriodicCheck};
use clubcare_core::error::CoreError;
use clubcare_core::trade::Trade;
use clubcare_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::FromRow;

/// A raw row from the `periodic_checks` table.
#[derive(Debug, Clone, FromRow)]
pub struct PeriodicCheckRow {
    pub id: DbId,
    pub club_id: DbId,
    pub title: String,
    pub space: String,
    pub trade: String,
    pub frequency_months: i32,
    pub next_due_date: NaiveDate,
    pub last_checked: Option<NaiveDate>,
    pub checklist: Json<Vec<ChecklistItem>>,
    pub status: String,
    pub history: Json<Vec<HistoryEntry>>,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<PeriodicCheckRow> for PeriodicCheck {
    type Error = CoreError;

    fn try_from(row: PeriodicCheckRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let invalid = |err: CoreError| CoreError::Storage(format!("periodic_checks row {id}: {err}"));

        let trade = Trade::from_name(&row.trade).map_err(invalid)?;
        let status = CheckStatus::from_name(&row.status).map_err(invalid)?;
        if row.frequency_months < 1 {
            return Err(invalid(CoreError::Validation(format!(
                "frequency_months must be positive, got {}",
                row.frequency_months
            ))));
        }

        Ok(PeriodicCheck {
            id,
            club_id: row.club_id,
            title: row.title,
            space: row.space,
            trade,
            frequency_months: row.frequency_months,
            next_due_date: row.next_due_date,
            last_checked: row.last_checked,
            checklist: row.checklist.0,
            status,
            history: row.history.0,
            deleted_at: row.deleted_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
