//! User entity <-> row mapper

use scout_core::entities::User;
use scout_core::value_objects::{RowId, UnitId, UserRoles};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::models::UserRow;

/// The visible-units value of a row
///
/// `unita_visibili` wins whenever it is present and not null; otherwise the legacy
/// `unita_associate` column is used.
pub fn visible_units_column(row: &UserRow) -> Option<&Value> {
    match (&row.visible_units, &row.associated_units) {
        (Some(v), _) if !v.is_null() => Some(v),
        (_, Some(legacy)) if !legacy.is_null() => Some(legacy),
        _ => None,
    }
}

/// Convert UserRow to User entity
impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        let visible_unit_ids = visible_units_column(&row)
            .map(UnitId::normalize_all)
            .unwrap_or_default();

        User {
            id: Some(RowId::new(row.id)),
            auth_id: row
                .auth_id
                .as_deref()
                .and_then(|raw| Uuid::parse_str(raw.trim()).ok()),
            email: row.email.unwrap_or_default().trim().to_string(),
            first_name: row.first_name.unwrap_or_default().trim().to_string(),
            last_name: row.last_name.unwrap_or_default().trim().to_string(),
            roles: UserRoles::from_flags(
                row.admin.unwrap_or(false),
                row.unit_leader.unwrap_or(false),
                row.helper.unwrap_or(false),
            ),
            visible_unit_ids,
            home_unit_id: row.home_unit_id.as_ref().and_then(UnitId::from_json),
        }
    }
}

/// Values written when an administrator changes a user's access
#[derive(Debug, Serialize)]
pub struct UserAccessPatch {
    pub admin: bool,
    pub capo_unita: bool,
    pub aiuto: bool,
    pub unita_visibili: Vec<i64>,
}

impl UserAccessPatch {
    pub fn new(roles: UserRoles, visible_unit_ids: &[UnitId]) -> Self {
        let mut ids: Vec<i64> = visible_unit_ids.iter().map(|id| id.into_inner()).collect();
        ids.sort_unstable();
        ids.dedup();

        Self {
            admin: roles.is_admin(),
            capo_unita: roles.is_unit_leader(),
            aiuto: roles.is_helper(),
            unita_visibili: ids,
        }
    }
}

/// Attaches an auth identity to an existing roster row
#[derive(Debug, Serialize)]
pub struct AuthLinkPatch {
    pub auth_id: Uuid,
}
