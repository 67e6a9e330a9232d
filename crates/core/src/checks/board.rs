//! Session-side mirror of the check collection.
//!
//! A [`CheckBoard`] holds one actor's copy of the live and trashed checks
//! as last loaded. Every mutation goes through the [`CheckEngine`] first;
//! the mirror is only touched after the store confirmed the write. A failed
//! action leaves the mirror as it was and records a failure notice.
//! Other sessions' writes become visible on the next [`CheckBoard::load`].

use std::cmp::Reverse;

use super::checklist::ItemRef;
use super::engine::CheckEngine;
use super::model::{CheckFilter, CreateCheck, PeriodicCheck, ReplaceCheck};
use super::summary::StatusSummary;
use crate::error::CoreError;
use crate::roles::Actor;
use crate::types::DbId;

pub struct CheckBoard {
    engine: CheckEngine,
    actor: Actor,
    filter: CheckFilter,
    checks: Vec<PeriodicCheck>,
    trashed: Vec<PeriodicCheck>,
    notice: Option<String>,
}

impl CheckBoard {
    pub fn new(engine: CheckEngine, actor: Actor, filter: CheckFilter) -> Self {
        Self {
            engine,
            actor,
            filter,
            checks: Vec::new(),
            trashed: Vec::new(),
            notice: None,
        }
    }

    pub fn checks(&self) -> &[PeriodicCheck] {
        &self.checks
    }

    pub fn trashed(&self) -> &[PeriodicCheck] {
        &self.trashed
    }

    pub fn get(&self, id: DbId) -> Option<&PeriodicCheck> {
        self.checks.iter().find(|c| c.id == id)
    }

    /// Failure message from the most recent action, if it failed.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Counts and alert feed over the mirrored statuses.
    pub fn summary(&self) -> StatusSummary {
        StatusSummary::from_checks(&self.checks)
    }

    /// Re-fetch both lists. On failure the previous copy stays displayed.
    pub async fn load(&mut self) -> Result<(), CoreError> {
        let loaded = async {
            let checks = self.engine.list_checks(&self.actor, &self.filter).await?;
            let trashed = self.engine.list_trashed(&self.actor).await?;
            Ok::<_, CoreError>((checks, trashed))
        }
        .await;
        let (checks, trashed) = self.settle(loaded)?;
        self.checks = checks;
        self.trashed = trashed;
        Ok(())
    }

    pub async fn create(&mut self, input: CreateCheck) -> Result<PeriodicCheck, CoreError> {
        let result = self.engine.create_check(&self.actor, input).await;
        let check = self.settle(result)?;
        Ok(self.put_live(check))
    }

    pub async fn edit(
        &mut self,
        id: DbId,
        replacement: ReplaceCheck,
    ) -> Result<PeriodicCheck, CoreError> {
        let result = self.engine.edit_check(&self.actor, id, replacement).await;
        let check = self.settle(result)?;
        Ok(self.put_live(check))
    }

    pub async fn toggle(&mut self, id: DbId, item: ItemRef) -> Result<PeriodicCheck, CoreError> {
        let result = self.engine.toggle_checklist_item(&self.actor, id, item).await;
        let check = self.settle(result)?;
        Ok(self.put_live(check))
    }

    pub async fn log_inspection(
        &mut self,
        id: DbId,
        notes: Option<String>,
    ) -> Result<PeriodicCheck, CoreError> {
        let result = self.engine.log_inspection(&self.actor, id, notes).await;
        let check = self.settle(result)?;
        Ok(self.put_live(check))
    }

    pub async fn soft_delete(&mut self, id: DbId) -> Result<(), CoreError> {
        let result = self.engine.soft_delete_check(&self.actor, id).await;
        let deleted_at = self.settle(result)?;
        if let Some(pos) = self.checks.iter().position(|c| c.id == id) {
            let mut check = self.checks.remove(pos);
            check.deleted_at = Some(deleted_at);
            self.put_trashed(check);
        }
        Ok(())
    }

    pub async fn restore(&mut self, id: DbId) -> Result<PeriodicCheck, CoreError> {
        let result = self.engine.restore_check(&self.actor, id).await;
        let check = self.settle(result)?;
        self.trashed.retain(|c| c.id != id);
        Ok(self.put_live(check))
    }

    pub async fn purge(&mut self, id: DbId) -> Result<(), CoreError> {
        let result = self.engine.permanently_delete_check(&self.actor, id).await;
        self.settle(result)?;
        self.trashed.retain(|c| c.id != id);
        Ok(())
    }

    /// Record the outcome of an action: clear the notice on success, set it
    /// on failure.
    fn settle<T>(&mut self, result: Result<T, CoreError>) -> Result<T, CoreError> {
        match result {
            Ok(value) => {
                self.notice = None;
                Ok(value)
            }
            Err(err) => {
                self.notice = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Insert or replace a live check, keeping due-date order. A check that
    /// moved out of the board's filter is dropped from the mirror.
    fn put_live(&mut self, check: PeriodicCheck) -> PeriodicCheck {
        self.checks.retain(|c| c.id != check.id);
        if self.filter.matches(&check) {
            let key = (check.next_due_date, check.id);
            let pos = self
                .checks
                .partition_point(|c| (c.next_due_date, c.id) < key);
            self.checks.insert(pos, check.clone());
        }
        check
    }

    /// Newest deletion first, matching [`CheckEngine::list_trashed`].
    fn put_trashed(&mut self, check: PeriodicCheck) {
        let key = (Reverse(check.deleted_at), check.id);
        let pos = self
            .trashed
            .partition_point(|c| (Reverse(c.deleted_at), c.id) < key);
        self.trashed.insert(pos, check);
    }
}
