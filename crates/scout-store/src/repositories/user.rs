//! REST implementation of UserRepository

use async_trait::async_trait;
use tracing::{debug, instrument};
use uuid::Uuid;

use scout_core::access::QueryFilter;
use scout_core::entities::User;
use scout_core::traits::{RepoResult, UserRepository};
use scout_core::value_objects::{RowId, UnitId, UserRoles};

use crate::client::RestClient;
use crate::mappers::{AuthLinkPatch, UserAccessPatch};
use crate::models::UserRow;
use crate::query::TableQuery;

use super::error::{ensure_affected, map_store_error, user_not_found};

/// REST implementation of UserRepository
#[derive(Clone)]
pub struct RestUserRepository {
    client: RestClient,
}

impl RestUserRepository {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    async fn find_one(&self, query: TableQuery) -> RepoResult<Option<User>> {
        let row = self
            .client
            .fetch_single::<UserRow>(&query)
            .await
            .map_err(map_store_error)?;
        Ok(row.map(User::from))
    }
}

#[async_trait]
impl UserRepository for RestUserRepository {
    #[instrument(skip(self))]
    async fn find_by_auth_id(&self, auth_id: Uuid) -> RepoResult<Option<User>> {
        self.find_one(TableQuery::new(UserRow::TABLE).eq("auth_id", auth_id))
            .await
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        self.find_one(TableQuery::new(UserRow::TABLE).eq("email", email.trim()))
            .await
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RowId) -> RepoResult<Option<User>> {
        self.find_one(TableQuery::new(UserRow::TABLE).eq("id", id))
            .await
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: &QueryFilter) -> RepoResult<Vec<User>> {
        let Some(query) = TableQuery::new(UserRow::TABLE)
            .order("cognome", true)
            .order("nome", true)
            .scoped("unita_id", filter)
        else {
            debug!("Filter matches nothing, skipping request");
            return Ok(Vec::new());
        };

        let rows = self
            .client
            .fetch::<UserRow>(&query)
            .await
            .map_err(map_store_error)?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self))]
    async fn link_auth_id(&self, id: RowId, auth_id: Uuid) -> RepoResult<()> {
        let affected = self
            .client
            .update(
                &TableQuery::new(UserRow::TABLE).eq("id", id),
                &AuthLinkPatch { auth_id },
            )
            .await
            .map_err(map_store_error)?;
        ensure_affected(affected, || user_not_found(id))
    }

    #[instrument(skip(self))]
    async fn update_access(
        &self,
        id: RowId,
        roles: UserRoles,
        visible_unit_ids: &[UnitId],
    ) -> RepoResult<()> {
        let affected = self
            .client
            .update(
                &TableQuery::new(UserRow::TABLE).eq("id", id),
                &UserAccessPatch::new(roles, visible_unit_ids),
            )
            .await
            .map_err(map_store_error)?;
        ensure_affected(affected, || user_not_found(id))
    }
}
