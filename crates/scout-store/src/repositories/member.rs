//! REST implementation of MemberRepository

use async_trait::async_trait;
use tracing::{debug, instrument};

use scout_core::access::QueryFilter;
use scout_core::entities::{Member, MemberDraft, Objective};
use scout_core::traits::{MemberRepository, RepoResult};
use scout_core::value_objects::RowId;

use crate::client::RestClient;
use crate::mappers::{collect_rows, MemberInsert, ObjectivesPatch};
use crate::models::MemberRow;
use crate::query::TableQuery;

use super::error::{ensure_affected, map_store_error, member_not_found};

/// REST implementation of MemberRepository
#[derive(Clone)]
pub struct RestMemberRepository {
    client: RestClient,
}

impl RestMemberRepository {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    async fn patch<B>(&self, id: RowId, body: &B) -> RepoResult<()>
    where
        B: serde::Serialize + Sync,
    {
        let affected = self
            .client
            .update(&TableQuery::new(MemberRow::TABLE).eq("id", id), body)
            .await
            .map_err(map_store_error)?;
        ensure_affected(affected, || member_not_found(id))
    }
}

#[async_trait]
impl MemberRepository for RestMemberRepository {
    #[instrument(skip(self))]
    async fn list(&self, filter: &QueryFilter) -> RepoResult<Vec<Member>> {
        let Some(query) = TableQuery::new(MemberRow::TABLE)
            .order("cognome", true)
            .order("nome", true)
            .scoped("unita_id", filter)
        else {
            debug!("Filter matches nothing, skipping request");
            return Ok(Vec::new());
        };

        let rows = self
            .client
            .fetch::<MemberRow>(&query)
            .await
            .map_err(map_store_error)?;
        Ok(collect_rows(rows, MemberRow::TABLE))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RowId) -> RepoResult<Option<Member>> {
        let row = self
            .client
            .fetch_single::<MemberRow>(&TableQuery::new(MemberRow::TABLE).eq("id", id))
            .await
            .map_err(map_store_error)?;
        row.map(Member::try_from).transpose()
    }

    #[instrument(skip(self, draft), fields(unit_id = %draft.unit_id))]
    async fn create(&self, draft: &MemberDraft) -> RepoResult<Member> {
        let body = MemberInsert::try_from(draft)?;
        let row = self
            .client
            .insert::<_, MemberRow>(MemberRow::TABLE, &body)
            .await
            .map_err(map_store_error)?;
        Member::try_from(row)
    }

    #[instrument(skip(self, draft))]
    async fn update(&self, id: RowId, draft: &MemberDraft) -> RepoResult<()> {
        self.patch(id, &MemberInsert::try_from(draft)?).await
    }

    #[instrument(skip(self, objectives), fields(count = objectives.len()))]
    async fn update_objectives(&self, id: RowId, objectives: &[Objective]) -> RepoResult<()> {
        self.patch(id, &ObjectivesPatch::new(objectives)?).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: RowId) -> RepoResult<()> {
        let affected = self
            .client
            .delete(&TableQuery::new(MemberRow::TABLE).eq("id", id))
            .await
            .map_err(map_store_error)?;
        ensure_affected(affected, || member_not_found(id))
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &QueryFilter) -> RepoResult<i64> {
        let Some(query) = TableQuery::new(MemberRow::TABLE).scoped("unita_id", filter) else {
            return Ok(0);
        };
        self.client.count(&query).await.map_err(map_store_error)
    }
}
