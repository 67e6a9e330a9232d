//! Repository for the `periodic_checks` table.

use chrono::NaiveDate;
use clubcare_core::checks::{HistoryEntry, NewCheck, PeriodicCheck};
use clubcare_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::periodic_check::PeriodicCheckRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, club_id, title, space, trade, frequency_months, next_due_date, \
     last_checked, checklist, status, history, deleted_at, created_at, updated_at";

/// Provides CRUD operations for periodic checks.
pub struct PeriodicCheckRepo;

impl PeriodicCheckRepo {
    /// Insert a new check with an empty history, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewCheck) -> Result<PeriodicCheckRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO periodic_checks
                (club_id, title, space, trade, frequency_months, next_due_date,
                 last_checked, checklist, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PeriodicCheckRow>(&query)
            .bind(input.club_id)
            .bind(&input.title)
            .bind(&input.space)
            .bind(input.trade.name())
            .bind(input.frequency_months)
            .bind(input.next_due_date)
            .bind(input.last_checked)
            .bind(Json(&input.checklist))
            .bind(input.status.name())
            .fetch_one(pool)
            .await
    }

    /// Find a check by ID, including soft-deleted rows.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PeriodicCheckRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM periodic_checks WHERE id = $1");
        sqlx::query_as::<_, PeriodicCheckRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every check, live and soft-deleted, ordered by ID.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<PeriodicCheckRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM periodic_checks ORDER BY id");
        sqlx::query_as::<_, PeriodicCheckRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Overwrite the editable columns and status of a live check.
    /// `history`, `deleted_at` and `created_at` are left as stored.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn replace(
        pool: &PgPool,
        check: &PeriodicCheck,
    ) -> Result<Option<PeriodicCheckRow>, sqlx::Error> {
        let query = format!(
            "UPDATE periodic_checks SET
                club_id = $2,
                title = $3,
                space = $4,
                trade = $5,
                frequency_months = $6,
                next_due_date = $7,
                last_checked = $8,
                checklist = $9,
                status = $10,
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PeriodicCheckRow>(&query)
            .bind(check.id)
            .bind(check.club_id)
            .bind(&check.title)
            .bind(&check.space)
            .bind(check.trade.name())
            .bind(check.frequency_months)
            .bind(check.next_due_date)
            .bind(check.last_checked)
            .bind(Json(&check.checklist))
            .bind(check.status.name())
            .fetch_optional(pool)
            .await
    }

    /// Append one history entry to a live check in a single statement, and
    /// record the inspection date and resulting status.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn append_history(
        pool: &PgPool,
        id: DbId,
        entry: &HistoryEntry,
        last_checked: NaiveDate,
    ) -> Result<Option<PeriodicCheckRow>, sqlx::Error> {
        let query = format!(
            "UPDATE periodic_checks SET
                history = history || $2,
                last_checked = $3,
                status = $4,
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PeriodicCheckRow>(&query)
            .bind(id)
            .bind(Json([entry]))
            .bind(last_checked)
            .bind(entry.status.name())
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a check. Returns `true` if a live row was marked deleted.
    pub async fn soft_delete(
        pool: &PgPool,
        id: DbId,
        deleted_at: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE periodic_checks SET deleted_at = $2 WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(deleted_at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted check. Returns `true` if a row was restored.
    pub async fn restore(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE periodic_checks SET deleted_at = NULL WHERE id = $1 AND deleted_at IS NOT NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a check by ID. Returns `true` if a row was removed.
    pub async fn hard_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM periodic_checks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
