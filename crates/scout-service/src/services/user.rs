//! User administration service
//!
//! The user roster and role assignment, both reserved to administrators.

use scout_core::{AccessScope, RowId, ScopedQueryBuilder, ScopedResource, User};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{UpdateAccessRequest, UserSummary};

use super::access::require_admin;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User administration service
pub struct UserAdminService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserAdminService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Every user ordered by last name
    #[instrument(skip(self, actor, scope))]
    pub async fn list_users(&self, actor: &User, scope: &AccessScope) -> ServiceResult<Vec<UserSummary>> {
        require_admin(actor)?;
        let filter = ScopedQueryBuilder::build(scope, ScopedResource::UserRoster, None);
        if filter.matches_nothing() {
            return Ok(Vec::new());
        }

        let users = self.ctx.user_repo().list(&filter).await?;
        Ok(users.iter().map(UserSummary::from).collect())
    }

    /// Replace a user's role flags and visible units
    ///
    /// Takes effect at that user's next sign-in; a running session keeps the
    /// scope it resolved at startup.
    #[instrument(skip(self, actor, request))]
    pub async fn update_access(
        &self,
        actor: &User,
        user_id: RowId,
        request: UpdateAccessRequest,
    ) -> ServiceResult<UserSummary> {
        require_admin(actor)?;
        request.validate()?;

        let mut user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id))?;

        let roles = request.roles();
        user.roles = roles;
        user.set_visible_units(request.visible_unit_ids);

        self.ctx
            .user_repo()
            .update_access(user_id, roles, &user.visible_unit_ids)
            .await?;
        info!(user_id = %user_id, roles = %roles, units = user.visible_unit_ids.len(), "User access updated");
        Ok(UserSummary::from(&user))
    }
}
