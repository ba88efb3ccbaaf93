//! Collaborator traits (ports) implemented by the store crate

mod auth;
mod repositories;

pub use auth::{AuthProvider, AuthResult, SignUpOutcome};
pub use repositories::{
    ActivityRepository, MemberRepository, RepoResult, SettingRepository, UnitRepository,
    UserRepository,
};
