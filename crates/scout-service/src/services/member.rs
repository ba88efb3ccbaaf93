//! Member service
//!
//! Member roster of a unit and each member's objective list.

use scout_core::{
    AccessScope, DomainError, Member, MemberDraft, Objective, RowId, ScopedResource, UnitId,
};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{MemberRequest, MemberView, ObjectiveRequest};

use super::access::{owned_filter, require_in_scope};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Member service
pub struct MemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Members of a unit ordered by last name
    #[instrument(skip(self))]
    pub async fn list(&self, scope: &AccessScope, unit_id: UnitId) -> ServiceResult<Vec<MemberView>> {
        let filter = owned_filter(scope, ScopedResource::Member, unit_id)?;
        let members = self.ctx.member_repo().list(&filter).await?;
        Ok(members.iter().map(MemberView::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn count(&self, scope: &AccessScope, unit_id: UnitId) -> ServiceResult<i64> {
        let filter = owned_filter(scope, ScopedResource::Member, unit_id)?;
        Ok(self.ctx.member_repo().count(&filter).await?)
    }

    #[instrument(skip(self, scope))]
    pub async fn get(&self, scope: &AccessScope, id: RowId) -> ServiceResult<MemberView> {
        let member = self.find_in_scope(scope, id).await?;
        Ok(MemberView::from(&member))
    }

    #[instrument(skip(self, scope, request), fields(unit_id = %request.unit_id))]
    pub async fn create(&self, scope: &AccessScope, request: MemberRequest) -> ServiceResult<MemberView> {
        request.validate()?;
        require_in_scope(scope, request.unit_id)?;

        let member = self
            .ctx
            .member_repo()
            .create(&MemberDraft::from(request))
            .await?;
        info!(member_id = %member.id, "Member created");
        Ok(MemberView::from(&member))
    }

    #[instrument(skip(self, scope, request))]
    pub async fn update(
        &self,
        scope: &AccessScope,
        id: RowId,
        request: MemberRequest,
    ) -> ServiceResult<()> {
        request.validate()?;
        self.find_in_scope(scope, id).await?;
        require_in_scope(scope, request.unit_id)?;

        self.ctx
            .member_repo()
            .update(id, &MemberDraft::from(request))
            .await?;
        info!(member_id = %id, "Member updated");
        Ok(())
    }

    #[instrument(skip(self, scope))]
    pub async fn delete(&self, scope: &AccessScope, id: RowId) -> ServiceResult<()> {
        self.find_in_scope(scope, id).await?;
        self.ctx.member_repo().delete(id).await?;
        info!(member_id = %id, "Member deleted");
        Ok(())
    }

    /// Append an objective and store the whole list
    #[instrument(skip(self, scope, request))]
    pub async fn add_objective(
        &self,
        scope: &AccessScope,
        id: RowId,
        request: ObjectiveRequest,
    ) -> ServiceResult<MemberView> {
        request.validate()?;
        let mut member = self.find_in_scope(scope, id).await?;
        member.add_objective(Objective::from(request));

        self.ctx
            .member_repo()
            .update_objectives(id, &member.objectives)
            .await?;
        Ok(MemberView::from(&member))
    }

    /// Remove the objective at `index` and store the remaining list
    #[instrument(skip(self, scope))]
    pub async fn remove_objective(
        &self,
        scope: &AccessScope,
        id: RowId,
        index: usize,
    ) -> ServiceResult<MemberView> {
        let mut member = self.find_in_scope(scope, id).await?;
        let len = member.objective_count();
        if member.remove_objective(index).is_none() {
            return Err(DomainError::ObjectiveOutOfRange { index, len }.into());
        }

        self.ctx
            .member_repo()
            .update_objectives(id, &member.objectives)
            .await?;
        Ok(MemberView::from(&member))
    }

    async fn find_in_scope(&self, scope: &AccessScope, id: RowId) -> ServiceResult<Member> {
        let member = self
            .ctx
            .member_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Member", id))?;
        require_in_scope(scope, member.unit_id)?;
        Ok(member)
    }
}
