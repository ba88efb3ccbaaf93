//! # scout-core
//!
//! Domain layer for the scouting-unit console: entities, value objects,
//! access scope resolution, scoped query filters and the collaborator traits
//! implemented by the store crate. No HTTP, no configuration.

pub mod access;
pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use access::{AccessScope, AccessScopeResolver, QueryFilter, ScopedQueryBuilder, ScopedResource};
pub use entities::{
    Activity, ActivityDraft, AuthEvent, AuthSession, AuthUser, Member, MemberDraft, NewSetting,
    NewUnit, Objective, ProfileMetadata, ScheduleSlot, Setting, Unit, UnitWithLeader, User,
};
pub use error::{AuthError, DomainError};
pub use traits::{
    ActivityRepository, AuthProvider, AuthResult, MemberRepository, RepoResult, SettingRepository,
    SignUpOutcome, UnitRepository, UserRepository,
};
pub use value_objects::{RowId, UnitId, UnitIdParseError, UserRoles};
