//! Error helpers for repositories

use scout_core::error::DomainError;
use scout_core::value_objects::{RowId, UnitId};

pub use crate::error::map_store_error;

/// Fail with `not_found` when a write touched no row
pub fn ensure_affected<F>(affected: usize, not_found: F) -> Result<(), DomainError>
where
    F: FnOnce() -> DomainError,
{
    if affected == 0 {
        return Err(not_found());
    }
    Ok(())
}

pub fn user_not_found(id: RowId) -> DomainError {
    DomainError::UserNotFound(id.to_string())
}

pub fn unit_not_found(id: UnitId) -> DomainError {
    DomainError::UnitNotFound(id)
}

pub fn activity_not_found(id: RowId) -> DomainError {
    DomainError::ActivityNotFound(id)
}

pub fn member_not_found(id: RowId) -> DomainError {
    DomainError::MemberNotFound(id)
}

pub fn setting_not_found(id: RowId) -> DomainError {
    DomainError::SettingNotFound(id)
}
