//! [`CheckStore`] backed by PostgreSQL.

use async_trait::async_trait;
use chrono::NaiveDate;
use clubcare_core::checks::{HistoryEntry, NewCheck, PeriodicCheck};
use clubcare_core::error::CoreError;
use clubcare_core::store::CheckStore;
use clubcare_core::types::{DbId, Timestamp};

use crate::repositories::PeriodicCheckRepo;
use crate::DbPool;

/// Adapts [`PeriodicCheckRepo`] to the engine's storage seam.
///
/// sqlx errors are logged here and reduced to an opaque
/// [`CoreError::Storage`].
#[derive(Clone)]
pub struct PgCheckStore {
    pool: DbPool,
}

impl PgCheckStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

fn storage_error(op: &'static str) -> impl FnOnce(sqlx::Error) -> CoreError {
    move |err| {
        tracing::error!(error = %err, op, "periodic_checks query failed");
        CoreError::Storage(format!("{op}: {err}"))
    }
}

#[async_trait]
impl CheckStore for PgCheckStore {
    async fn insert(&self, input: &NewCheck) -> Result<PeriodicCheck, CoreError> {
        let row = PeriodicCheckRepo::create(&self.pool, input)
            .await
            .map_err(storage_error("insert"))?;
        PeriodicCheck::try_from(row)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<PeriodicCheck>, CoreError> {
        PeriodicCheckRepo::find_by_id_include_deleted(&self.pool, id)
            .await
            .map_err(storage_error("find_by_id"))?
            .map(PeriodicCheck::try_from)
            .transpose()
    }

    async fn list_all(&self) -> Result<Vec<PeriodicCheck>, CoreError> {
        PeriodicCheckRepo::list_all(&self.pool)
            .await
            .map_err(storage_error("list_all"))?
            .into_iter()
            .map(PeriodicCheck::try_from)
            .collect()
    }

    async fn update(&self, check: &PeriodicCheck) -> Result<Option<PeriodicCheck>, CoreError> {
        PeriodicCheckRepo::replace(&self.pool, check)
            .await
            .map_err(storage_error("update"))?
            .map(PeriodicCheck::try_from)
            .transpose()
    }

    async fn append_history(
        &self,
        id: DbId,
        entry: &HistoryEntry,
        last_checked: NaiveDate,
    ) -> Result<Option<PeriodicCheck>, CoreError> {
        PeriodicCheckRepo::append_history(&self.pool, id, entry, last_checked)
            .await
            .map_err(storage_error("append_history"))?
            .map(PeriodicCheck::try_from)
            .transpose()
    }

    async fn set_deleted_at(
        &self,
        id: DbId,
        deleted_at: Option<Timestamp>,
    ) -> Result<bool, CoreError> {
        match deleted_at {
            Some(at) => PeriodicCheckRepo::soft_delete(&self.pool, id, at)
                .await
                .map_err(storage_error("soft_delete")),
            None => PeriodicCheckRepo::restore(&self.pool, id)
                .await
                .map_err(storage_error("restore")),
        }
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        PeriodicCheckRepo::hard_delete(&self.pool, id)
            .await
            .map_err(storage_error("delete"))
    }

    async fn ping(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(storage_error("ping"))
    }
}
