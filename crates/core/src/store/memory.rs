//! In-process [`CheckStore`] backed by a `BTreeMap`.
//!
//! Used by tests and local tooling. Failure switches simulate an
//! unreachable backend so callers can exercise their error paths.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;

use super::CheckStore;
use crate::checks::model::{HistoryEntry, NewCheck, PeriodicCheck};
use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

#[derive(Debug, Default)]
pub struct MemoryCheckStore {
    rows: RwLock<BTreeMap<DbId, PeriodicCheck>>,
    last_id: AtomicI64,
    fail_writes: AtomicBool,
    offline: AtomicBool,
}

impl MemoryCheckStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every write fail with [`CoreError::Storage`]. Reads still work.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every call, reads and `ping` included, fail.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_read(&self) -> Result<(), CoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(CoreError::Storage("memory store is offline".into()));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), CoreError> {
        self.check_read()?;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CoreError::Storage("memory store rejected the write".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl CheckStore for MemoryCheckStore {
    async fn insert(&self, input: &NewCheck) -> Result<PeriodicCheck, CoreError> {
        self.check_write()?;
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        let now = Utc::now();
        let check = PeriodicCheck {
            id,
            club_id: input.club_id,
            title: input.title.clone(),
            space: input.space.clone(),
            trade: input.trade,
            frequency_months: input.frequency_months,
            next_due_date: input.next_due_date,
            last_checked: input.last_checked,
            checklist: input.checklist.clone(),
            status: input.status,
            history: Vec::new(),
            deleted_at: None,
            created_at: now,
            updated_at: now,
        };
        self.rows.write().await.insert(id, check.clone());
        Ok(check)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<PeriodicCheck>, CoreError> {
        self.check_read()?;
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<PeriodicCheck>, CoreError> {
        self.check_read()?;
        Ok(self.rows.read().await.values().cloned().collect())
    }

    async fn update(&self, check: &PeriodicCheck) -> Result<Option<PeriodicCheck>, CoreError> {
        self.check_write()?;
        let mut rows = self.rows.write().await;
        let Some(stored) = rows.get_mut(&check.id).filter(|c| !c.is_deleted()) else {
            return Ok(None);
        };
        let history = std::mem::take(&mut stored.history);
        let created_at = stored.created_at;
        *stored = PeriodicCheck {
            history,
            deleted_at: None,
            created_at,
            updated_at: Utc::now(),
            ..check.clone()
        };
        Ok(Some(stored.clone()))
    }

    async fn append_history(
        &self,
        id: DbId,
        entry: &HistoryEntry,
        last_checked: NaiveDate,
    ) -> Result<Option<PeriodicCheck>, CoreError> {
        self.check_write()?;
        let mut rows = self.rows.write().await;
        let Some(stored) = rows.get_mut(&id).filter(|c| !c.is_deleted()) else {
            return Ok(None);
        };
        stored.history.push(entry.clone());
        stored.last_checked = Some(last_checked);
        stored.status = entry.status;
        stored.updated_at = Utc::now();
        Ok(Some(stored.clone()))
    }

    async fn set_deleted_at(
        &self,
        id: DbId,
        deleted_at: Option<Timestamp>,
    ) -> Result<bool, CoreError> {
        self.check_write()?;
        let mut rows = self.rows.write().await;
        match rows.get_mut(&id) {
            Some(row) if row.deleted_at.is_some() != deleted_at.is_some() => {
                row.deleted_at = deleted_at;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        self.check_write()?;
        Ok(self.rows.write().await.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), CoreError> {
        self.check_read()
    }
}
