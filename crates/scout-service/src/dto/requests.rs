//! Request DTOs for console forms
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use chrono::NaiveDate;
use scout_core::{RowId, UnitId};
use serde::Deserialize;
use validator::{Validate, ValidationError};

// ============================================================================
// Auth Requests
// ============================================================================

/// Login form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Registration form
///
/// Password strength and confirmation are checked by the auth service
/// layer, which owns the shared credential rules.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub last_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,

    pub password_confirmation: String,

    /// Required; `None` means the form was submitted without a unit
    #[serde(default)]
    pub unit_id: Option<UnitId>,
}

// ============================================================================
// Activity Requests
// ============================================================================

/// One row of an activity's timetable
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScheduleSlotRequest {
    pub time: String,
    pub label: String,
    pub description: String,
    pub owner: String,
}

/// Create or edit an activity
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ActivityRequest {
    pub unit_id: UnitId,

    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[serde(default)]
    pub objectives: Option<String>,

    pub date: NaiveDate,

    #[serde(default)]
    pub achieved: Option<String>,

    #[serde(default)]
    pub schedule: Vec<ScheduleSlotRequest>,
}

// ============================================================================
// Member Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ObjectiveRequest {
    #[validate(length(min = 1, max = 200, message = "Objective title must be 1-200 characters"))]
    pub title: String,

    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Create or edit a member
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MemberRequest {
    pub unit_id: UnitId,

    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub last_name: String,

    #[validate(range(min = 1900, max = 2100, message = "Year must be between 1900 and 2100"))]
    pub year: Option<i32>,

    #[serde(default)]
    pub role: Option<String>,

    #[serde(default)]
    #[validate(nested)]
    pub objectives: Vec<ObjectiveRequest>,
}

// ============================================================================
// Setting Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SettingRequest {
    pub unit_id: UnitId,

    #[validate(length(min = 1, max = 100, message = "Key must be 1-100 characters"))]
    pub key: String,

    #[validate(length(max = 2000, message = "Value must be at most 2000 characters"))]
    pub value: String,
}

// ============================================================================
// Site Administration Requests
// ============================================================================

/// Create or edit a unit
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UnitRequest {
    #[validate(length(min = 1, max = 100, message = "Unit name must be 1-100 characters"))]
    pub name: String,

    #[serde(default)]
    pub leader_id: Option<RowId>,

    #[serde(default)]
    pub helper_ids: Vec<RowId>,

    #[serde(default)]
    #[validate(range(min = 0, message = "Member count cannot be negative"))]
    pub member_count: Option<i64>,
}

/// Change a user's role flags and visible units
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_access_request"))]
pub struct UpdateAccessRequest {
    #[serde(default)]
    pub admin: bool,

    #[serde(default)]
    pub unit_leader: bool,

    #[serde(default)]
    pub helper: bool,

    #[serde(default)]
    pub visible_unit_ids: Vec<UnitId>,
}

fn validate_access_request(request: &UpdateAccessRequest) -> Result<(), ValidationError> {
    if (request.unit_leader || request.helper) && request.visible_unit_ids.is_empty() {
        let mut err = ValidationError::new("unit_staff_without_units");
        err.message = Some("Leaders and helpers need at least one visible unit".into());
        return Err(err);
    }
    Ok(())
}
