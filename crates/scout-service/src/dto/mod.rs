//! Data transfer objects for console forms and panels
//!
//! This module provides:
//! - Request DTOs with validation for form input
//! - View models for rendering panels
//! - Mappers between domain entities and DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    ActivityRequest, LoginRequest, MemberRequest, ObjectiveRequest, ScheduleSlotRequest,
    SettingRequest, SignUpRequest, UnitRequest, UpdateAccessRequest,
};

pub use responses::{
    ActivitySummary, ActivityView, ConsoleCapabilities, LoginNotice, MemberView, NoticeKind,
    ObjectiveView, ProfileView, ScheduleSlotView, SettingView, UnitCard, UnitOption, UserSummary,
};
