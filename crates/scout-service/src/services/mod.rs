//! Business logic services
//!
//! Services borrow the [`ServiceContext`] and take the caller's access
//! scope (and, for role-gated operations, the acting user) explicitly.

pub mod access;
pub mod activity;
pub mod auth;
pub mod context;
pub mod error;
pub mod member;
pub mod profile;
pub mod registration;
pub mod setting;
pub mod unit;
pub mod user;

pub use activity::ActivityService;
pub use auth::{login_notice, AuthService};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use member::MemberService;
pub use profile::{LoadedProfile, ProfileService};
pub use registration::RegistrationService;
pub use setting::SettingService;
pub use unit::UnitService;
pub use user::UserAdminService;
