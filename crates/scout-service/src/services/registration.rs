//! Registration service
//!
//! Registration links carry an optional unit that the sign-up form
//! pre-selects.

use scout_common::RegistrationToken;
use scout_core::{QueryFilter, UnitId, User};
use tracing::{instrument, warn};

use crate::dto::UnitOption;

use super::access::require_admin;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Registration service
pub struct RegistrationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RegistrationService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Build a registration URL, optionally tied to a unit (administrators only)
    #[instrument(skip(self, actor))]
    pub fn registration_link(&self, actor: &User, unit_id: Option<UnitId>) -> ServiceResult<String> {
        require_admin(actor)?;
        Ok(RegistrationToken::new(unit_id).to_url(self.ctx.registration_base_url())?)
    }

    /// Unit to pre-select for a registration URL
    ///
    /// A malformed token is logged and ignored.
    pub fn preselected_unit(&self, url: &str) -> Option<UnitId> {
        match RegistrationToken::from_url(url) {
            Ok(token) => token.and_then(|t| t.unit_id),
            Err(e) => {
                warn!(error = %e, "Ignoring malformed registration token");
                None
            }
        }
    }

    /// Every unit, for the sign-up form's picker
    #[instrument(skip(self))]
    pub async fn registration_units(&self) -> ServiceResult<Vec<UnitOption>> {
        let units = self.ctx.unit_repo().list(&QueryFilter::NoFilter).await?;
        Ok(units.iter().map(UnitOption::from).collect())
    }
}
