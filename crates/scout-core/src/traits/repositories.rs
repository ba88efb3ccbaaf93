//! Repository traits (ports) - define the interface for data access
//!
//! Every list operation takes a [`QueryFilter`] produced by the
//! [`ScopedQueryBuilder`](crate::access::ScopedQueryBuilder). Implementations
//! apply it to the collection's unit key and return an empty list for
//! [`QueryFilter::MatchNone`] without contacting the backend.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::access::QueryFilter;
use crate::entities::{
    Activity, ActivityDraft, Member, MemberDraft, NewSetting, NewUnit, Objective, Setting, Unit,
    User,
};
use crate::error::DomainError;
use crate::value_objects::{RowId, UnitId, UserRoles};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a profile by its auth identity
    async fn find_by_auth_id(&self, auth_id: Uuid) -> RepoResult<Option<User>>;

    /// Find a profile by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Find a profile by row id
    async fn find_by_id(&self, id: RowId) -> RepoResult<Option<User>>;

    /// List profiles ordered by last name; the filter applies to the home unit
    async fn list(&self, filter: &QueryFilter) -> RepoResult<Vec<User>>;

    /// Attach an auth identity to a profile created before sign-up
    async fn link_auth_id(&self, id: RowId, auth_id: Uuid) -> RepoResult<()>;

    /// Replace role flags and visible units
    async fn update_access(
        &self,
        id: RowId,
        roles: UserRoles,
        visible_unit_ids: &[UnitId],
    ) -> RepoResult<()>;
}

// ============================================================================
// Unit Repository
// ============================================================================

#[async_trait]
pub trait UnitRepository: Send + Sync {
    /// Find unit by ID
    async fn find_by_id(&self, id: UnitId) -> RepoResult<Option<Unit>>;

    /// List units ordered by name
    async fn list(&self, filter: &QueryFilter) -> RepoResult<Vec<Unit>>;

    /// Create a new unit
    async fn create(&self, unit: &NewUnit) -> RepoResult<Unit>;

    /// Update name, leader and helpers
    async fn update(&self, unit: &Unit) -> RepoResult<()>;

    /// Delete a unit
    async fn delete(&self, id: UnitId) -> RepoResult<()>;

    /// Overwrite the denormalized member count
    async fn set_member_count(&self, id: UnitId, count: i64) -> RepoResult<()>;
}

// ============================================================================
// Activity Repository
// ============================================================================

#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// List activities ordered by date, newest first
    async fn list(&self, filter: &QueryFilter) -> RepoResult<Vec<Activity>>;

    /// List activities dated within `[from, to]`, oldest first
    async fn list_in_range(
        &self,
        filter: &QueryFilter,
        from: NaiveDate,
        to: NaiveDate,
    ) -> RepoResult<Vec<Activity>>;

    /// Find activity by ID
    async fn find_by_id(&self, id: RowId) -> RepoResult<Option<Activity>>;

    async fn create(&self, draft: &ActivityDraft) -> RepoResult<Activity>;

    async fn update(&self, id: RowId, draft: &ActivityDraft) -> RepoResult<()>;

    async fn delete(&self, id: RowId) -> RepoResult<()>;
}

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// List members ordered by last name
    async fn list(&self, filter: &QueryFilter) -> RepoResult<Vec<Member>>;

    /// Find member by ID
    async fn find_by_id(&self, id: RowId) -> RepoResult<Option<Member>>;

    async fn create(&self, draft: &MemberDraft) -> RepoResult<Member>;

    async fn update(&self, id: RowId, draft: &MemberDraft) -> RepoResult<()>;

    /// Replace the objective list
    async fn update_objectives(&self, id: RowId, objectives: &[Objective]) -> RepoResult<()>;

    async fn delete(&self, id: RowId) -> RepoResult<()>;

    /// Count members matching the filter
    async fn count(&self, filter: &QueryFilter) -> RepoResult<i64>;
}

// ============================================================================
// Setting Repository
// ============================================================================

#[async_trait]
pub trait SettingRepository: Send + Sync {
    /// List settings ordered by key
    async fn list(&self, filter: &QueryFilter) -> RepoResult<Vec<Setting>>;

    async fn find_by_id(&self, id: RowId) -> RepoResult<Option<Setting>>;

    async fn create(&self, setting: &NewSetting) -> RepoResult<Setting>;

    async fn update_value(&self, id: RowId, value: &str) -> RepoResult<()>;

    async fn delete(&self, id: RowId) -> RepoResult<()>;
}
