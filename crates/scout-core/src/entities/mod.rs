//! Domain entities - core business objects

mod activity;
mod member;
mod session;
mod setting;
mod unit;
mod user;

pub use activity::{Activity, ActivityDraft, ScheduleSlot};
pub use member::{Member, MemberDraft, Objective};
pub use session::{AuthEvent, AuthSession, AuthUser, ProfileMetadata};
pub use setting::{NewSetting, Setting};
pub use unit::{NewUnit, Unit, UnitWithLeader};
pub use user::User;
