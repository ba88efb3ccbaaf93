//! Activity service

use chrono::NaiveDate;
use scout_core::{AccessScope, Activity, ActivityDraft, RowId, ScopedResource, UnitId};
use tracing::{info, instrument};
use validator::Validate;

use crate::calendar::CalendarMonth;
use crate::dto::{ActivityRequest, ActivityView};

use super::access::{owned_filter, require_in_scope};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Activity service
pub struct ActivityService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ActivityService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Activities of a unit, newest first
    #[instrument(skip(self))]
    pub async fn list(&self, scope: &AccessScope, unit_id: UnitId) -> ServiceResult<Vec<ActivityView>> {
        let filter = owned_filter(scope, ScopedResource::Activity, unit_id)?;
        let activities = self.ctx.activity_repo().list(&filter).await?;
        Ok(activities.iter().map(ActivityView::from).collect())
    }

    /// Activities of a unit dated within a calendar month
    #[instrument(skip(self))]
    pub async fn in_month(
        &self,
        scope: &AccessScope,
        unit_id: UnitId,
        month: CalendarMonth,
    ) -> ServiceResult<Vec<Activity>> {
        self.in_range(scope, unit_id, month.first_day(), month.last_day())
            .await
    }

    pub async fn in_range(
        &self,
        scope: &AccessScope,
        unit_id: UnitId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ServiceResult<Vec<Activity>> {
        let filter = owned_filter(scope, ScopedResource::Activity, unit_id)?;
        Ok(self
            .ctx
            .activity_repo()
            .list_in_range(&filter, from, to)
            .await?)
    }

    #[instrument(skip(self, scope))]
    pub async fn get(&self, scope: &AccessScope, id: RowId) -> ServiceResult<ActivityView> {
        let activity = self.find_in_scope(scope, id).await?;
        Ok(ActivityView::from(&activity))
    }

    #[instrument(skip(self, scope, request), fields(unit_id = %request.unit_id))]
    pub async fn create(
        &self,
        scope: &AccessScope,
        request: ActivityRequest,
    ) -> ServiceResult<ActivityView> {
        request.validate()?;
        require_in_scope(scope, request.unit_id)?;

        let activity = self
            .ctx
            .activity_repo()
            .create(&ActivityDraft::from(request))
            .await?;
        info!(activity_id = %activity.id, "Activity created");
        Ok(ActivityView::from(&activity))
    }

    /// Edit an activity; moving it to another unit needs both units in scope
    #[instrument(skip(self, scope, request))]
    pub async fn update(
        &self,
        scope: &AccessScope,
        id: RowId,
        request: ActivityRequest,
    ) -> ServiceResult<()> {
        request.validate()?;
        self.find_in_scope(scope, id).await?;
        require_in_scope(scope, request.unit_id)?;

        self.ctx
            .activity_repo()
            .update(id, &ActivityDraft::from(request))
            .await?;
        info!(activity_id = %id, "Activity updated");
        Ok(())
    }

    #[instrument(skip(self, scope))]
    pub async fn delete(&self, scope: &AccessScope, id: RowId) -> ServiceResult<()> {
        self.find_in_scope(scope, id).await?;
        self.ctx.activity_repo().delete(id).await?;
        info!(activity_id = %id, "Activity deleted");
        Ok(())
    }

    async fn find_in_scope(&self, scope: &AccessScope, id: RowId) -> ServiceResult<Activity> {
        let activity = self
            .ctx
            .activity_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Activity", id))?;
        require_in_scope(scope, activity.unit_id)?;
        Ok(activity)
    }
}
