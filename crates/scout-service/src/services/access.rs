//! Access guards shared by the services
//!
//! Reads only need the unit in scope. Writes on settings additionally need
//! a unit role; site administration needs the admin flag.

use scout_core::{
    AccessScope, DomainError, QueryFilter, ScopedQueryBuilder, ScopedResource, UnitId, User,
};
use tracing::warn;

use super::error::{ServiceError, ServiceResult};

/// Reject a unit outside the scope before any request is made for it
pub fn require_in_scope(scope: &AccessScope, unit_id: UnitId) -> ServiceResult<()> {
    if ScopedQueryBuilder::is_unit_in_scope(scope, unit_id) {
        Ok(())
    } else {
        warn!(unit_id = %unit_id, "Rejected unit outside scope");
        Err(ServiceError::OutOfScope(unit_id))
    }
}

pub fn require_admin(actor: &User) -> ServiceResult<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(DomainError::AdminRequired.into())
    }
}

/// Leaders, helpers and administrators
pub fn require_unit_staff(actor: &User) -> ServiceResult<()> {
    if actor.is_admin() || actor.roles.manages_unit() {
        Ok(())
    } else {
        Err(DomainError::UnitStaffRequired.into())
    }
}

/// Filter for `resource` rows owned by a unit, after checking the unit is
/// in scope
pub fn owned_filter(
    scope: &AccessScope,
    resource: ScopedResource,
    unit_id: UnitId,
) -> ServiceResult<QueryFilter> {
    debug_assert!(resource.is_unit_owned(), "{resource:?} is not unit-owned");
    require_in_scope(scope, unit_id)?;
    Ok(ScopedQueryBuilder::build(scope, resource, Some(unit_id)))
}
