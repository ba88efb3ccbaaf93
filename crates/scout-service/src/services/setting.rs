//! Setting service
//!
//! Key/value settings of a unit. Anyone with the unit in scope can read
//! them; changing them needs a unit role.

use scout_core::{AccessScope, NewSetting, RowId, ScopedResource, Setting, UnitId, User};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{SettingRequest, SettingView};

use super::access::{owned_filter, require_in_scope, require_unit_staff};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Setting service
pub struct SettingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SettingService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, scope: &AccessScope, unit_id: UnitId) -> ServiceResult<Vec<SettingView>> {
        let filter = owned_filter(scope, ScopedResource::Setting, unit_id)?;
        let settings = self.ctx.setting_repo().list(&filter).await?;
        Ok(settings.iter().map(SettingView::from).collect())
    }

    #[instrument(skip(self, actor, scope, request), fields(unit_id = %request.unit_id))]
    pub async fn create(
        &self,
        actor: &User,
        scope: &AccessScope,
        request: SettingRequest,
    ) -> ServiceResult<SettingView> {
        request.validate()?;
        require_in_scope(scope, request.unit_id)?;
        require_unit_staff(actor)?;

        let setting = self
            .ctx
            .setting_repo()
            .create(&NewSetting::from(request))
            .await?;
        info!(setting_id = %setting.id, key = %setting.key, "Setting created");
        Ok(SettingView::from(&setting))
    }

    #[instrument(skip(self, actor, scope, value))]
    pub async fn update_value(
        &self,
        actor: &User,
        scope: &AccessScope,
        id: RowId,
        value: &str,
    ) -> ServiceResult<()> {
        self.find_in_scope(scope, id).await?;
        require_unit_staff(actor)?;
        self.ctx.setting_repo().update_value(id, value).await?;
        info!(setting_id = %id, "Setting updated");
        Ok(())
    }

    #[instrument(skip(self, actor, scope))]
    pub async fn delete(&self, actor: &User, scope: &AccessScope, id: RowId) -> ServiceResult<()> {
        self.find_in_scope(scope, id).await?;
        require_unit_staff(actor)?;
        self.ctx.setting_repo().delete(id).await?;
        info!(setting_id = %id, "Setting deleted");
        Ok(())
    }

    async fn find_in_scope(&self, scope: &AccessScope, id: RowId) -> ServiceResult<Setting> {
        let setting = self
            .ctx
            .setting_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Setting", id))?;
        require_in_scope(scope, setting.unit_id)?;
        Ok(setting)
    }
}
