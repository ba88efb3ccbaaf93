//! REST implementation of UnitRepository

use async_trait::async_trait;
use tracing::{debug, instrument};

use scout_core::access::QueryFilter;
use scout_core::entities::{NewUnit, Unit};
use scout_core::traits::{RepoResult, UnitRepository};
use scout_core::value_objects::UnitId;

use crate::client::RestClient;
use crate::mappers::{collect_rows, MemberCountPatch, UnitInsert, UnitUpdate};
use crate::models::UnitRow;
use crate::query::TableQuery;

use super::error::{ensure_affected, map_store_error, unit_not_found};

/// REST implementation of UnitRepository
#[derive(Clone)]
pub struct RestUnitRepository {
    client: RestClient,
}

impl RestUnitRepository {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UnitRepository for RestUnitRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UnitId) -> RepoResult<Option<Unit>> {
        let row = self
            .client
            .fetch_single::<UnitRow>(&TableQuery::new(UnitRow::TABLE).eq("id", id))
            .await
            .map_err(map_store_error)?;
        row.map(Unit::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: &QueryFilter) -> RepoResult<Vec<Unit>> {
        let Some(query) = TableQuery::new(UnitRow::TABLE)
            .order("nome", true)
            .scoped("id", filter)
        else {
            debug!("Filter matches nothing, skipping request");
            return Ok(Vec::new());
        };

        let rows = self
            .client
            .fetch::<UnitRow>(&query)
            .await
            .map_err(map_store_error)?;
        Ok(collect_rows(rows, UnitRow::TABLE))
    }

    #[instrument(skip(self))]
    async fn create(&self, unit: &NewUnit) -> RepoResult<Unit> {
        let row = self
            .client
            .insert::<_, UnitRow>(UnitRow::TABLE, &UnitInsert::from(unit))
            .await
            .map_err(map_store_error)?;
        Unit::try_from(row)
    }

    #[instrument(skip(self), fields(unit_id = %unit.id))]
    async fn update(&self, unit: &Unit) -> RepoResult<()> {
        let affected = self
            .client
            .update(
                &TableQuery::new(UnitRow::TABLE).eq("id", unit.id),
                &UnitUpdate::from(unit),
            )
            .await
            .map_err(map_store_error)?;
        ensure_affected(affected, || unit_not_found(unit.id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: UnitId) -> RepoResult<()> {
        let affected = self
            .client
            .delete(&TableQuery::new(UnitRow::TABLE).eq("id", id))
            .await
            .map_err(map_store_error)?;
        ensure_affected(affected, || unit_not_found(id))
    }

    #[instrument(skip(self))]
    async fn set_member_count(&self, id: UnitId, count: i64) -> RepoResult<()> {
        let affected = self
            .client
            .update(
                &TableQuery::new(UnitRow::TABLE).eq("id", id),
                &MemberCountPatch { nr_membri: count },
            )
            .await
            .map_err(map_store_error)?;
        ensure_affected(affected, || unit_not_found(id))
    }
}
