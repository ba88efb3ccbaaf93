//! Access scope - which units a user may see

use std::collections::BTreeSet;

use crate::entities::User;
use crate::value_objects::UnitId;

/// The set of units a user is permitted to view and manage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessScope {
    /// Administrator: every unit, present and future
    Unrestricted,
    /// Only the listed units (possibly none)
    RestrictedTo(BTreeSet<UnitId>),
}

impl AccessScope {
    /// Scope matching no unit at all
    #[must_use]
    pub fn empty() -> Self {
        Self::RestrictedTo(BTreeSet::new())
    }

    /// Restricted scope over the given units
    #[must_use]
    pub fn units(ids: impl IntoIterator<Item = UnitId>) -> Self {
        Self::RestrictedTo(ids.into_iter().collect())
    }

    #[inline]
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        matches!(self, Self::Unrestricted)
    }

    /// True for a restricted scope with no units. Never true for Unrestricted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Unrestricted => false,
            Self::RestrictedTo(ids) => ids.is_empty(),
        }
    }

    /// Whether the given unit is visible under this scope
    #[must_use]
    pub fn contains(&self, unit_id: UnitId) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::RestrictedTo(ids) => ids.contains(&unit_id),
        }
    }

    /// The explicit unit set, `None` when unrestricted
    #[must_use]
    pub fn unit_ids(&self) -> Option<&BTreeSet<UnitId>> {
        match self {
            Self::Unrestricted => None,
            Self::RestrictedTo(ids) => Some(ids),
        }
    }
}

/// Computes a user's access scope
///
/// Rules, first match wins:
/// 1. administrators are unrestricted, whatever their unit list says;
/// 2. a non-empty unit list restricts the scope to those units;
/// 3. anything else is the empty scope.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessScopeResolver;

impl AccessScopeResolver {
    #[must_use]
    pub fn resolve(user: &User) -> AccessScope {
        if user.is_admin() {
            return AccessScope::Unrestricted;
        }

        if user.visible_unit_ids.is_empty() {
            return AccessScope::empty();
        }

        AccessScope::units(user.visible_unit_ids.iter().copied())
    }
}
