//! View models for the console panels
//!
//! All response DTOs implement `Serialize` so any front-end can render them.

use chrono::NaiveDate;
use scout_core::{RowId, UnitId};
use serde::Serialize;

// ============================================================================
// Session
// ============================================================================

/// Which console areas the signed-in user may open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConsoleCapabilities {
    /// Unit administration panel (leaders and helpers)
    pub unit_admin_tab: bool,
    /// Site administration panel (administrators)
    pub site_admin_tab: bool,
    /// Registration link generator (administrators)
    pub registration_links: bool,
}

/// Signed-in user as shown in the console header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileView {
    pub display_name: String,
    pub email: String,
    /// No profile row exists yet; the user sees an empty console
    pub incomplete: bool,
    pub capabilities: ConsoleCapabilities,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// Message shown above the login form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginNotice {
    pub kind: NoticeKind,
    pub text: String,
}

// ============================================================================
// Units
// ============================================================================

/// Entry of a unit picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitOption {
    pub id: UnitId,
    pub name: String,
}

/// Unit card of the site administration panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitCard {
    pub id: UnitId,
    pub name: String,
    pub leader_name: Option<String>,
    pub helper_count: usize,
    pub member_count: i64,
}

// ============================================================================
// Activities
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleSlotView {
    pub time: String,
    pub label: String,
    pub description: String,
    pub owner: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityView {
    pub id: RowId,
    pub unit_id: UnitId,
    pub title: String,
    pub objectives: Option<String>,
    pub date: NaiveDate,
    pub achieved: Option<String>,
    pub schedule: Vec<ScheduleSlotView>,
}

/// Activity as placed on a calendar cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivitySummary {
    pub id: RowId,
    pub title: String,
}

// ============================================================================
// Members
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectiveView {
    pub title: String,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberView {
    pub id: RowId,
    pub unit_id: UnitId,
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    pub year: Option<i32>,
    pub role: Option<String>,
    pub objectives: Vec<ObjectiveView>,
}

// ============================================================================
// Settings and users
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingView {
    pub id: RowId,
    pub key: String,
    pub value: String,
}

/// Row of the user roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub id: Option<RowId>,
    pub email: String,
    pub display_name: String,
    pub admin: bool,
    pub unit_leader: bool,
    pub helper: bool,
    pub visible_unit_ids: Vec<UnitId>,
}
