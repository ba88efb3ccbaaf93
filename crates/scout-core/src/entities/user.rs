//! User entity - a console account and its permission profile

use uuid::Uuid;

use crate::value_objects::{RowId, UnitId, UserRoles};

/// User profile as stored in the roster collection
///
/// `visible_unit_ids` is always canonical here; coercion from whatever the
/// store holds happens in the store mappers, never downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Roster row id, `None` for a provisional profile with no row yet
    pub id: Option<RowId>,
    /// Identity issued by the auth service
    pub auth_id: Option<Uuid>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub roles: UserRoles,
    pub visible_unit_ids: Vec<UnitId>,
    /// Unit picked at registration time
    pub home_unit_id: Option<UnitId>,
}

impl User {
    /// Create a profile with no roles and no visible units
    pub fn new(email: String, first_name: String, last_name: String) -> Self {
        Self {
            id: None,
            auth_id: None,
            email,
            first_name,
            last_name,
            roles: UserRoles::empty(),
            visible_unit_ids: Vec::new(),
            home_unit_id: None,
        }
    }

    /// "First Last"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.roles.is_admin()
    }

    /// A provisional profile exists only in memory (no roster row)
    #[inline]
    pub fn is_provisional(&self) -> bool {
        self.id.is_none()
    }

    /// Whether the roster row still lacks the auth identity link
    #[inline]
    pub fn needs_auth_link(&self) -> bool {
        self.id.is_some() && self.auth_id.is_none()
    }

    /// Replace the visible units, keeping the first occurrence of duplicates
    pub fn set_visible_units(&mut self, unit_ids: impl IntoIterator<Item = UnitId>) {
        let mut ids: Vec<UnitId> = Vec::new();
        for id in unit_ids {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        self.visible_unit_ids = ids;
    }
}
