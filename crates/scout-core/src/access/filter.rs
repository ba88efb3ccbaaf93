//! Scoped query filters
//!
//! Turns an [`AccessScope`] into the row filter a repository applies. Every
//! collection is keyed by a unit: units by their own id, activities,
//! members and settings by their owning unit. Filters speak in terms of
//! that unit key and leave column names to the store.

use std::collections::BTreeSet;

use super::scope::AccessScope;
use crate::value_objects::UnitId;

/// Row filter over a collection's unit key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryFilter {
    /// Fetch every row
    NoFilter,
    /// Unit key is one of the given units (never empty)
    UnitIn(BTreeSet<UnitId>),
    /// Unit key equals the given unit
    UnitEq(UnitId),
    /// Matches zero rows; callers skip the remote call entirely
    MatchNone,
}

impl QueryFilter {
    #[inline]
    pub fn matches_nothing(&self) -> bool {
        matches!(self, Self::MatchNone)
    }

    /// Evaluate the filter against a row's unit key
    pub fn matches(&self, unit_id: UnitId) -> bool {
        match self {
            Self::NoFilter => true,
            Self::UnitIn(ids) => ids.contains(&unit_id),
            Self::UnitEq(id) => *id == unit_id,
            Self::MatchNone => false,
        }
    }
}

/// Collections whose reads are gated by the access scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopedResource {
    Unit,
    Activity,
    Member,
    Setting,
    UserRoster,
}

impl ScopedResource {
    /// Whether rows of this collection belong to a single unit
    pub fn is_unit_owned(self) -> bool {
        matches!(self, Self::Activity | Self::Member | Self::Setting)
    }
}

/// Builds scope-respecting filters
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopedQueryBuilder;

impl ScopedQueryBuilder {
    /// Filter for the unit collection
    pub fn build_unit_filter(scope: &AccessScope) -> QueryFilter {
        match scope {
            AccessScope::Unrestricted => QueryFilter::NoFilter,
            AccessScope::RestrictedTo(ids) if ids.is_empty() => QueryFilter::MatchNone,
            AccessScope::RestrictedTo(ids) => QueryFilter::UnitIn(ids.clone()),
        }
    }

    /// Filter for rows owned by `unit_id` (activities, members, settings)
    ///
    /// The owning unit must itself be in scope, otherwise nothing matches.
    pub fn build_owned_filter(scope: &AccessScope, unit_id: UnitId) -> QueryFilter {
        if Self::is_unit_in_scope(scope, unit_id) {
            QueryFilter::UnitEq(unit_id)
        } else {
            QueryFilter::MatchNone
        }
    }

    /// Filter for the user roster; only administrators list other users
    pub fn build_roster_filter(scope: &AccessScope) -> QueryFilter {
        if scope.is_unrestricted() {
            QueryFilter::NoFilter
        } else {
            QueryFilter::MatchNone
        }
    }

    /// Filter for any scoped collection
    ///
    /// Unit-owned collections need the selected unit; without one they match
    /// nothing.
    pub fn build(
        scope: &AccessScope,
        resource: ScopedResource,
        selected_unit: Option<UnitId>,
    ) -> QueryFilter {
        match resource {
            ScopedResource::Unit => Self::build_unit_filter(scope),
            ScopedResource::UserRoster => Self::build_roster_filter(scope),
            ScopedResource::Activity | ScopedResource::Member | ScopedResource::Setting => {
                selected_unit.map_or(QueryFilter::MatchNone, |unit_id| {
                    Self::build_owned_filter(scope, unit_id)
                })
            }
        }
    }

    /// Validate a unit selection before trusting it
    #[inline]
    pub fn is_unit_in_scope(scope: &AccessScope, unit_id: UnitId) -> bool {
        scope.contains(unit_id)
    }
}
