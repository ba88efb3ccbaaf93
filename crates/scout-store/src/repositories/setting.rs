//! REST implementation of SettingRepository

use async_trait::async_trait;
use tracing::{debug, instrument};

use scout_core::access::QueryFilter;
use scout_core::entities::{NewSetting, Setting};
use scout_core::traits::{RepoResult, SettingRepository};
use scout_core::value_objects::RowId;

use crate::client::RestClient;
use crate::mappers::{collect_rows, SettingInsert, SettingValuePatch};
use crate::models::SettingRow;
use crate::query::TableQuery;

use super::error::{ensure_affected, map_store_error, setting_not_found};

/// REST implementation of SettingRepository
#[derive(Clone)]
pub struct RestSettingRepository {
    client: RestClient,
}

impl RestSettingRepository {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SettingRepository for RestSettingRepository {
    #[instrument(skip(self))]
    async fn list(&self, filter: &QueryFilter) -> RepoResult<Vec<Setting>> {
        let Some(query) = TableQuery::new(SettingRow::TABLE)
            .order("chiave", true)
            .scoped("unita_id", filter)
        else {
            debug!("Filter matches nothing, skipping request");
            return Ok(Vec::new());
        };

        let rows = self
            .client
            .fetch::<SettingRow>(&query)
            .await
            .map_err(map_store_error)?;
        Ok(collect_rows(rows, SettingRow::TABLE))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RowId) -> RepoResult<Option<Setting>> {
        let row = self
            .client
            .fetch_single::<SettingRow>(&TableQuery::new(SettingRow::TABLE).eq("id", id))
            .await
            .map_err(map_store_error)?;
        row.map(Setting::try_from).transpose()
    }

    #[instrument(skip(self, setting), fields(unit_id = %setting.unit_id, key = %setting.key))]
    async fn create(&self, setting: &NewSetting) -> RepoResult<Setting> {
        let row = self
            .client
            .insert::<_, SettingRow>(SettingRow::TABLE, &SettingInsert::from(setting))
            .await
            .map_err(map_store_error)?;
        Setting::try_from(row)
    }

    #[instrument(skip(self, value))]
    async fn update_value(&self, id: RowId, value: &str) -> RepoResult<()> {
        let affected = self
            .client
            .update(
                &TableQuery::new(SettingRow::TABLE).eq("id", id),
                &SettingValuePatch { valore: value },
            )
            .await
            .map_err(map_store_error)?;
        ensure_affected(affected, || setting_not_found(id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: RowId) -> RepoResult<()> {
        let affected = self
            .client
            .delete(&TableQuery::new(SettingRow::TABLE).eq("id", id))
            .await
            .map_err(map_store_error)?;
        ensure_affected(affected, || setting_not_found(id))
    }
}
