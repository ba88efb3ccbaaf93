//! Row models
//!
//! Serde mirrors of the backend tables. Field names follow the backend's
//! column names through `rename`; loosely typed columns are kept as
//! `serde_json::Value` and interpreted by the mappers.

mod activity;
mod auth;
mod member;
mod setting;
mod unit;
mod user;

pub use activity::{ActivityRow, ScheduleSlotRow};
pub use auth::{AuthErrorBody, AuthUserRow, SignUpResponse, TokenResponse};
pub use member::{MemberRow, ObjectiveRow};
pub use setting::SettingRow;
pub use unit::UnitRow;
pub use user::UserRow;
