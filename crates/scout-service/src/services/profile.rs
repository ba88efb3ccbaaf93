//! Profile service
//!
//! Resolves the profile row behind an auth identity and the access scope
//! that comes with it.

use scout_core::{AccessScope, AccessScopeResolver, AuthUser, User};
use tracing::{info, instrument, warn};

use crate::dto::{ConsoleCapabilities, ProfileView};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Profile of the signed-in user together with its resolved scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedProfile {
    pub user: User,
    pub scope: AccessScope,
    /// No profile row exists; built from the session metadata
    pub incomplete: bool,
}

impl LoadedProfile {
    fn new(user: User, incomplete: bool) -> Self {
        let scope = AccessScopeResolver::resolve(&user);
        Self {
            user,
            scope,
            incomplete,
        }
    }

    pub fn capabilities(&self) -> ConsoleCapabilities {
        ConsoleCapabilities::from(&self.user)
    }

    pub fn view(&self) -> ProfileView {
        ProfileView {
            display_name: self.user.display_name(),
            email: self.user.email.clone(),
            incomplete: self.incomplete,
            capabilities: self.capabilities(),
        }
    }
}

/// Profile service
pub struct ProfileService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProfileService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Load the profile for an auth identity
    ///
    /// Looks the row up by auth id, then by email. A row found by email that
    /// carries no auth id gets linked; a failed link is logged and ignored.
    /// Without any row a provisional, unprivileged profile is returned.
    #[instrument(skip(self, auth_user), fields(auth_id = %auth_user.id))]
    pub async fn load(&self, auth_user: &AuthUser) -> ServiceResult<LoadedProfile> {
        let repo = self.ctx.user_repo();

        if let Some(user) = repo.find_by_auth_id(auth_user.id).await? {
            return Ok(LoadedProfile::new(user, false));
        }

        let Some(mut user) = repo.find_by_email(&auth_user.email).await? else {
            info!("No profile row, using provisional profile");
            return Ok(LoadedProfile::new(Self::provisional(auth_user), true));
        };

        if let Some(row_id) = user.id.filter(|_| user.needs_auth_link()) {
            match repo.link_auth_id(row_id, auth_user.id).await {
                Ok(()) => {
                    info!(user_id = %row_id, "Linked profile to auth identity");
                    user.auth_id = Some(auth_user.id);
                }
                Err(e) => warn!(user_id = %row_id, error = %e, "Failed to link profile"),
            }
        }

        Ok(LoadedProfile::new(user, false))
    }

    /// Unprivileged profile built from the sign-up metadata
    pub fn provisional(auth_user: &AuthUser) -> User {
        let metadata = &auth_user.metadata;
        let first_name = metadata
            .first_name
            .clone()
            .unwrap_or_else(|| auth_user.email_local_part().to_string());

        let mut user = User::new(
            auth_user.email.clone(),
            first_name,
            metadata.last_name.clone().unwrap_or_default(),
        );
        user.auth_id = Some(auth_user.id);
        user.home_unit_id = metadata.unit_id;
        user
    }
}
