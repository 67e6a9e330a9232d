//! Persistence seam for periodic checks.
//!
//! The engine only needs equality match on id plus a full listing; anything
//! that can do that (PostgreSQL, an in-memory map, a remote table API) can
//! back it.

pub mod memory;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::checks::model::{HistoryEntry, NewCheck, PeriodicCheck};
use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

pub use memory::MemoryCheckStore;

/// Storage operations for the `periodic_checks` collection.
///
/// Every method is one round-trip and either fully succeeds or leaves the
/// stored data untouched. Failures are reported as [`CoreError::Storage`].
#[async_trait]
pub trait CheckStore: Send + Sync {
    /// Insert a new check, returning the stored row with its assigned id.
    async fn insert(&self, input: &NewCheck) -> Result<PeriodicCheck, CoreError>;

    /// Find a check by id, including soft-deleted rows.
    async fn find_by_id(&self, id: DbId) -> Result<Option<PeriodicCheck>, CoreError>;

    /// Every stored check, including soft-deleted rows, ordered by id.
    async fn list_all(&self) -> Result<Vec<PeriodicCheck>, CoreError>;

    /// Overwrite the editable columns and status of the live row matching
    /// `check.id`.
    ///
    /// `history`, soft-delete state and `created_at` are not written.
    /// Returns `None` if no live row matched.
    async fn update(&self, check: &PeriodicCheck) -> Result<Option<PeriodicCheck>, CoreError>;

    /// Append `entry` to the live row's history in place, setting
    /// `last_checked` and the cached status to the entry's.
    ///
    /// Concurrent appends all land. Returns `None` if no live row matched.
    async fn append_history(
        &self,
        id: DbId,
        entry: &HistoryEntry,
        last_checked: NaiveDate,
    ) -> Result<Option<PeriodicCheck>, CoreError>;

    /// Set or clear the soft-delete marker. Returns `true` if a row changed.
    ///
    /// `deleted_at: Some(_)` only matches live rows; `None` only matches
    /// trashed rows.
    async fn set_deleted_at(
        &self,
        id: DbId,
        deleted_at: Option<Timestamp>,
    ) -> Result<bool, CoreError>;

    /// Permanently remove a row. Returns `true` if a row was removed.
    async fn delete(&self, id: DbId) -> Result<bool, CoreError>;

    /// Cheap reachability check.
    async fn ping(&self) -> Result<(), CoreError> {
        Ok(())
    }
}
