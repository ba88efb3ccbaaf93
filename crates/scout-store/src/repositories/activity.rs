//! REST implementation of ActivityRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, instrument};

use scout_core::access::QueryFilter;
use scout_core::entities::{Activity, ActivityDraft};
use scout_core::traits::{ActivityRepository, RepoResult};
use scout_core::value_objects::RowId;

use crate::client::RestClient;
use crate::mappers::{collect_rows, ActivityInsert};
use crate::models::ActivityRow;
use crate::query::TableQuery;

use super::error::{activity_not_found, ensure_affected, map_store_error};

/// REST implementation of ActivityRepository
#[derive(Clone)]
pub struct RestActivityRepository {
    client: RestClient,
}

impl RestActivityRepository {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    async fn fetch_scoped(&self, query: TableQuery, filter: &QueryFilter) -> RepoResult<Vec<Activity>> {
        let Some(query) = query.scoped("unita_id", filter) else {
            debug!("Filter matches nothing, skipping request");
            return Ok(Vec::new());
        };

        let rows = self
            .client
            .fetch::<ActivityRow>(&query)
            .await
            .map_err(map_store_error)?;
        Ok(collect_rows(rows, ActivityRow::TABLE))
    }
}

#[async_trait]
impl ActivityRepository for RestActivityRepository {
    #[instrument(skip(self))]
    async fn list(&self, filter: &QueryFilter) -> RepoResult<Vec<Activity>> {
        self.fetch_scoped(
            TableQuery::new(ActivityRow::TABLE).order("data", false),
            filter,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn list_in_range(
        &self,
        filter: &QueryFilter,
        from: NaiveDate,
        to: NaiveDate,
    ) -> RepoResult<Vec<Activity>> {
        if from > to {
            return Ok(Vec::new());
        }

        self.fetch_scoped(
            TableQuery::new(ActivityRow::TABLE)
                .gte("data", from)
                .lte("data", to)
                .order("data", true),
            filter,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RowId) -> RepoResult<Option<Activity>> {
        let row = self
            .client
            .fetch_single::<ActivityRow>(&TableQuery::new(ActivityRow::TABLE).eq("id", id))
            .await
            .map_err(map_store_error)?;
        row.map(Activity::try_from).transpose()
    }

    #[instrument(skip(self, draft), fields(unit_id = %draft.unit_id))]
    async fn create(&self, draft: &ActivityDraft) -> RepoResult<Activity> {
        let body = ActivityInsert::try_from(draft)?;
        let row = self
            .client
            .insert::<_, ActivityRow>(ActivityRow::TABLE, &body)
            .await
            .map_err(map_store_error)?;
        Activity::try_from(row)
    }

    #[instrument(skip(self, draft))]
    async fn update(&self, id: RowId, draft: &ActivityDraft) -> RepoResult<()> {
        let body = ActivityInsert::try_from(draft)?;
        let affected = self
            .client
            .update(&TableQuery::new(ActivityRow::TABLE).eq("id", id), &body)
            .await
            .map_err(map_store_error)?;
        ensure_affected(affected, || activity_not_found(id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: RowId) -> RepoResult<()> {
        let affected = self
            .client
            .delete(&TableQuery::new(ActivityRow::TABLE).eq("id", id))
            .await
            .map_err(map_store_error)?;
        ensure_affected(affected, || activity_not_found(id))
    }
}
