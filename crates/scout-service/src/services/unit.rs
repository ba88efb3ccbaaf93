//! Unit service
//!
//! Unit pickers for the signed-in user and unit management for the site
//! administration panel.

use std::collections::HashMap;

use scout_core::{
    AccessScope, NewUnit, QueryFilter, ScopedQueryBuilder, ScopedResource, Unit, UnitId,
    UnitWithLeader, User,
};
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::dto::{UnitCard, UnitOption, UnitRequest};

use super::access::{owned_filter, require_admin, require_in_scope};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Unit service
pub struct UnitService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UnitService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Units the scope can see, ordered by name
    ///
    /// An empty scope answers with an empty list without touching the store.
    #[instrument(skip(self))]
    pub async fn visible_units(&self, scope: &AccessScope) -> ServiceResult<Vec<UnitOption>> {
        let filter = ScopedQueryBuilder::build(scope, ScopedResource::Unit, None);
        if filter.matches_nothing() {
            debug!("Empty scope, no units to load");
            return Ok(Vec::new());
        }

        let units = self.ctx.unit_repo().list(&filter).await?;
        Ok(units.iter().map(UnitOption::from).collect())
    }

    /// Fetch one unit after checking it is in scope
    #[instrument(skip(self))]
    pub async fn get_unit(&self, scope: &AccessScope, unit_id: UnitId) -> ServiceResult<Unit> {
        require_in_scope(scope, unit_id)?;
        self.ctx
            .unit_repo()
            .find_by_id(unit_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Unit", unit_id))
    }

    /// Every unit with its leader's name (administrators only)
    #[instrument(skip(self, actor))]
    pub async fn list_with_leaders(&self, actor: &User) -> ServiceResult<Vec<UnitCard>> {
        require_admin(actor)?;

        let units = self.ctx.unit_repo().list(&QueryFilter::NoFilter).await?;
        let users = self.ctx.user_repo().list(&QueryFilter::NoFilter).await?;
        let names: HashMap<_, _> = users
            .iter()
            .filter_map(|u| u.id.map(|id| (id, u.display_name())))
            .collect();

        Ok(units
            .into_iter()
            .map(|unit| {
                let leader_name = unit.leader_id.and_then(|id| names.get(&id).cloned());
                UnitCard::from(&UnitWithLeader { unit, leader_name })
            })
            .collect())
    }

    #[instrument(skip(self, actor, request), fields(name = %request.name))]
    pub async fn create_unit(&self, actor: &User, request: UnitRequest) -> ServiceResult<Unit> {
        require_admin(actor)?;
        request.validate()?;

        let unit = self.ctx.unit_repo().create(&NewUnit::from(request)).await?;
        info!(unit_id = %unit.id, "Unit created");
        Ok(unit)
    }

    #[instrument(skip(self, actor, request))]
    pub async fn update_unit(
        &self,
        actor: &User,
        unit_id: UnitId,
        request: UnitRequest,
    ) -> ServiceResult<Unit> {
        require_admin(actor)?;
        request.validate()?;

        let mut unit = self
            .ctx
            .unit_repo()
            .find_by_id(unit_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Unit", unit_id))?;
        request.apply_to(&mut unit);

        self.ctx.unit_repo().update(&unit).await?;
        info!(unit_id = %unit_id, "Unit updated");
        Ok(unit)
    }

    /// Delete a unit; dependent rows are left to the backend
    #[instrument(skip(self, actor))]
    pub async fn delete_unit(&self, actor: &User, unit_id: UnitId) -> ServiceResult<()> {
        require_admin(actor)?;
        self.ctx.unit_repo().delete(unit_id).await?;
        info!(unit_id = %unit_id, "Unit deleted");
        Ok(())
    }

    /// Recount a unit's members and store the result on the unit
    #[instrument(skip(self))]
    pub async fn refresh_member_count(
        &self,
        scope: &AccessScope,
        unit_id: UnitId,
    ) -> ServiceResult<i64> {
        let filter = owned_filter(scope, ScopedResource::Member, unit_id)?;
        let count = self.ctx.member_repo().count(&filter).await?;
        self.ctx.unit_repo().set_member_count(unit_id, count).await?;
        debug!(unit_id = %unit_id, count, "Member count refreshed");
        Ok(count)
    }
}
