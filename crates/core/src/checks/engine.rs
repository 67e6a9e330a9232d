//! Periodic-check lifecycle service.
//!
//! [`CheckEngine`] authorizes and validates every operation before it
//! touches the store, performs at most one write per mutation, and returns
//! the stored result. It keeps no state of its own, so a failed write never
//! leaves anything half-applied.
//!
//! Reads recompute status against the clock; they never write.

use std::sync::Arc;

use chrono::{SubsecRound, Utc};
use validator::Validate;

use super::checklist::{self, ItemRef};
use super::model::{CheckFilter, CreateCheck, HistoryEntry, NewCheck, PeriodicCheck, ReplaceCheck};
use super::status::{derive_status, CheckStatus};
use super::summary::StatusSummary;
use crate::clock::Clock;
use crate::error::CoreError;
use crate::roles::Actor;
use crate::store::CheckStore;
use crate::types::{DbId, Timestamp};

/// Entity name used in `NotFound` errors.
const ENTITY: &str = "PeriodicCheck";

#[derive(Clone)]
pub struct CheckEngine {
    store: Arc<dyn CheckStore>,
    clock: Arc<dyn Clock>,
}

impl CheckEngine {
    pub fn new(store: Arc<dyn CheckStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &dyn CheckStore {
        self.store.as_ref()
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    // -- Reads ----------------------------------------------------------

    /// A live check visible to `actor`, with status as of today.
    pub async fn get_check(&self, actor: &Actor, id: DbId) -> Result<PeriodicCheck, CoreError> {
        let mut check = self.load_live(actor, id).await?;
        check.refresh_status(self.clock.today());
        Ok(check)
    }

    /// Live checks visible to `actor`, soonest due first.
    pub async fn list_checks(
        &self,
        actor: &Actor,
        filter: &CheckFilter,
    ) -> Result<Vec<PeriodicCheck>, CoreError> {
        let today = self.clock.today();
        let mut checks: Vec<PeriodicCheck> = self
            .store
            .list_all()
            .await?
            .into_iter()
            .filter(|c| !c.is_deleted() && actor.can_see_club(c.club_id) && filter.matches(c))
            .collect();
        for check in &mut checks {
            check.refresh_status(today);
        }
        checks.sort_by_key(|c| (c.next_due_date, c.id));
        Ok(checks)
    }

    /// Soft-deleted checks visible to `actor`, most recently trashed first.
    pub async fn list_trashed(&self, actor: &Actor) -> Result<Vec<PeriodicCheck>, CoreError> {
        let today = self.clock.today();
        let mut checks: Vec<PeriodicCheck> = self
            .store
            .list_all()
            .await?
            .into_iter()
            .filter(|c| c.is_deleted() && actor.can_see_club(c.club_id))
            .collect();
        for check in &mut checks {
            check.refresh_status(today);
        }
        checks.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at).then(a.id.cmp(&b.id)));
        Ok(checks)
    }

    /// Per-status counts and the alert feed for the actor's live checks.
    pub async fn status_summary(
        &self,
        actor: &Actor,
        filter: &CheckFilter,
    ) -> Result<StatusSummary, CoreError> {
        let checks = self.list_checks(actor, filter).await?;
        Ok(StatusSummary::from_checks(&checks))
    }

    // -- Mutations ------------------------------------------------------

    pub async fn create_check(
        &self,
        actor: &Actor,
        input: CreateCheck,
    ) -> Result<PeriodicCheck, CoreError> {
        actor.require_manager()?;
        input.validate()?;
        self.require_club(actor, input.club_id)?;

        let new = NewCheck::from_create(input, self.clock.today());
        let check = self.store.insert(&new).await?;
        tracing::info!(
            check_id = check.id,
            club_id = check.club_id,
            user_id = actor.user_id,
            status = %check.status,
            "Periodic check created"
        );
        Ok(check)
    }

    /// Replace every editable field. Last writer wins.
    pub async fn edit_check(
        &self,
        actor: &Actor,
        id: DbId,
        replacement: ReplaceCheck,
    ) -> Result<PeriodicCheck, CoreError> {
        actor.require_manager()?;
        replacement.validate()?;
        self.require_club(actor, replacement.club_id)?;

        let mut check = self.load_live(actor, id).await?;
        replacement.apply_to(&mut check, self.clock.today());
        let stored = self.write(&check).await?;
        tracing::info!(
            check_id = id,
            user_id = actor.user_id,
            status = %stored.status,
            "Periodic check replaced"
        );
        Ok(stored)
    }

    /// Flip one checklist item. See [`checklist::status_after_toggle`] for
    /// the resulting status. A stored non-completed status is re-derived from
    /// the due date first, so a toggle never persists a stale value. Does not
    /// record history.
    pub async fn toggle_checklist_item(
        &self,
        actor: &Actor,
        id: DbId,
        item: ItemRef,
    ) -> Result<PeriodicCheck, CoreError> {
        actor.require_operator()?;

        let today = self.clock.today();
        let mut check = self.load_live(actor, id).await?;
        let previous = match check.status {
            CheckStatus::Completed => CheckStatus::Completed,
            _ => derive_status(check.next_due_date, today),
        };
        let status = checklist::toggle(&mut check.checklist, &item, previous)
            .ok_or_else(|| CoreError::Validation(format!("Check {id} has no item with {item}")))?;
        check.status = status;

        let stored = self.write(&check).await?;
        tracing::info!(
            check_id = id,
            user_id = actor.user_id,
            item = %item,
            status = %stored.status,
            "Checklist item toggled"
        );
        Ok(stored)
    }

    /// Append a history entry for an inspection performed today.
    ///
    /// Sets `last_checked` but leaves the due date and checklist alone; the
    /// next cycle is scheduled by editing the check. The entry is appended
    /// by the store, so concurrent writers never drop each other's entries.
    pub async fn log_inspection(
        &self,
        actor: &Actor,
        id: DbId,
        notes: Option<String>,
    ) -> Result<PeriodicCheck, CoreError> {
        actor.require_operator()?;

        let today = self.clock.today();
        let check = self.load_live(actor, id).await?;
        let entry = HistoryEntry {
            date: today,
            technician_id: actor.user_id,
            technician_name: actor.name.clone(),
            status: check.resolved_status(today),
            notes: notes.filter(|n| !n.trim().is_empty()),
        };

        let stored = self
            .store
            .append_history(id, &entry, today)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(
            check_id = id,
            user_id = actor.user_id,
            entries = stored.history.len(),
            "Inspection logged"
        );
        Ok(stored)
    }

    /// Move a live check to the recycle bin, returning the stored
    /// `deleted_at`.
    pub async fn soft_delete_check(&self, actor: &Actor, id: DbId) -> Result<Timestamp, CoreError> {
        actor.require_manager()?;
        self.load_live(actor, id).await?;

        // TIMESTAMPTZ keeps microseconds.
        let deleted_at = Utc::now().trunc_subsecs(6);
        if !self.store.set_deleted_at(id, Some(deleted_at)).await? {
            return Err(not_found(id));
        }
        tracing::info!(check_id = id, user_id = actor.user_id, "Periodic check trashed");
        Ok(deleted_at)
    }

    /// Bring a check back from the recycle bin unchanged.
    pub async fn restore_check(&self, actor: &Actor, id: DbId) -> Result<PeriodicCheck, CoreError> {
        actor.require_manager()?;
        let mut check = self.load_trashed(actor, id).await?;

        if !self.store.set_deleted_at(id, None).await? {
            return Err(not_found(id));
        }
        check.deleted_at = None;
        check.refresh_status(self.clock.today());
        tracing::info!(check_id = id, user_id = actor.user_id, "Periodic check restored");
        Ok(check)
    }

    /// Irreversibly remove a check that is already in the recycle bin.
    pub async fn permanently_delete_check(&self, actor: &Actor, id: DbId) -> Result<(), CoreError> {
        actor.require_purge()?;
        self.load_trashed(actor, id).await?;

        if !self.store.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(check_id = id, user_id = actor.user_id, "Periodic check purged");
        Ok(())
    }

    // -- Helpers --------------------------------------------------------

    fn require_club(&self, actor: &Actor, club_id: DbId) -> Result<(), CoreError> {
        if actor.can_see_club(club_id) {
            Ok(())
        } else {
            tracing::warn!(user_id = actor.user_id, club_id, "Club outside actor scope");
            Err(CoreError::Forbidden(format!("No access to club {club_id}")))
        }
    }

    /// Fetch a check the actor can see, in either bin state.
    async fn load_visible(&self, actor: &Actor, id: DbId) -> Result<PeriodicCheck, CoreError> {
        self.store
            .find_by_id(id)
            .await?
            .filter(|c| actor.can_see_club(c.club_id))
            .ok_or_else(|| not_found(id))
    }

    async fn load_live(&self, actor: &Actor, id: DbId) -> Result<PeriodicCheck, CoreError> {
        let check = self.load_visible(actor, id).await?;
        if check.is_deleted() {
            return Err(not_found(id));
        }
        Ok(check)
    }

    async fn load_trashed(&self, actor: &Actor, id: DbId) -> Result<PeriodicCheck, CoreError> {
        let check = self.load_visible(actor, id).await?;
        if !check.is_deleted() {
            return Err(not_found(id));
        }
        Ok(check)
    }

    async fn write(&self, check: &PeriodicCheck) -> Result<PeriodicCheck, CoreError> {
        self.store
            .update(check)
            .await?
            .ok_or_else(|| not_found(check.id))
    }
}

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound { entity: ENTITY, id }
}
