//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{RowId, UnitId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Unit not found: {0}")]
    UnitNotFound(UnitId),

    #[error("Activity not found: {0}")]
    ActivityNotFound(RowId),

    #[error("Member not found: {0}")]
    MemberNotFound(RowId),

    #[error("Setting not found: {0}")]
    SettingNotFound(RowId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid unit id: {0}")]
    InvalidUnitId(String),

    #[error("Objective index {index} out of range ({len} objectives)")]
    ObjectiveOutOfRange { index: usize, len: usize },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Unit {0} is outside the user's scope")]
    OutOfScope(UnitId),

    #[error("Administrator privileges required")]
    AdminRequired,

    #[error("Unit staff privileges required")]
    UnitStaffRequired,

    #[error("Not authenticated")]
    Unauthenticated,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Backend error: {0}")]
    BackendError(String),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for the presentation layer
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::UnitNotFound(_) => "UNKNOWN_UNIT",
            Self::ActivityNotFound(_) => "UNKNOWN_ACTIVITY",
            Self::MemberNotFound(_) => "UNKNOWN_MEMBER",
            Self::SettingNotFound(_) => "UNKNOWN_SETTING",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidUnitId(_) => "INVALID_UNIT_ID",
            Self::ObjectiveOutOfRange { .. } => "OBJECTIVE_OUT_OF_RANGE",

            // Authorization
            Self::OutOfScope(_) => "UNIT_OUT_OF_SCOPE",
            Self::AdminRequired => "ADMIN_REQUIRED",
            Self::UnitStaffRequired => "UNIT_STAFF_REQUIRED",
            Self::Unauthenticated => "UNAUTHENTICATED",

            // Infrastructure
            Self::BackendError(_) => "BACKEND_ERROR",
            Self::MalformedRecord(_) => "MALFORMED_RECORD",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::UnitNotFound(_)
                | Self::ActivityNotFound(_)
                | Self::MemberNotFound(_)
                | Self::SettingNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::InvalidUnitId(_) | Self::ObjectiveOutOfRange { .. }
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::OutOfScope(_) | Self::AdminRequired | Self::UnitStaffRequired | Self::Unauthenticated
        )
    }

    /// Check if this came from the remote data store
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            Self::BackendError(_) | Self::MalformedRecord(_) | Self::InternalError(_)
        )
    }
}
