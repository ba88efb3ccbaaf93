//! Row to entity mappers
//!
//! The one place where loosely typed backend data becomes canonical:
//! ids stored as strings or numbers, JSON columns stored as text, the two
//! historical names of the visible-units column.
//! - `From`/`TryFrom<Row> for Entity`: rows to domain objects
//! - `*Insert`/`*Patch` structs: entity data prepared for writes

mod activity;
mod auth;
mod json;
mod member;
mod setting;
mod unit;
mod user;

pub use activity::ActivityInsert;
pub use auth::{session_from_token_response, SignUpBody, SignUpMetadata};
pub use json::{collect_rows, json_elements, parse_date, row_id_from_json};
pub use member::{MemberInsert, ObjectivesPatch};
pub use setting::{SettingInsert, SettingValuePatch};
pub use unit::{MemberCountPatch, UnitInsert, UnitUpdate};
pub use user::{visible_units_column, AuthLinkPatch, UserAccessPatch};
