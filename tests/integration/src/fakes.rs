//! In-memory collaborators
//!
//! `MemoryStore` backs all five repositories with one shared state and
//! records every call it receives, so tests can assert which units were
//! ever asked for. `FakeAuth` stands in for the auth service.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use parking_lot::Mutex;
use scout_core::{
    Activity, ActivityDraft, ActivityRepository, AuthError, AuthEvent, AuthProvider, AuthResult,
    AuthSession, AuthUser, DomainError, Member, MemberDraft, MemberRepository, NewSetting, NewUnit,
    Objective, ProfileMetadata, QueryFilter, RepoResult, RowId, Setting, SettingRepository,
    SignUpOutcome, Unit, UnitId, UnitRepository, User, UserRepository, UserRoles,
};
use tokio::sync::{broadcast, Notify};
use uuid::Uuid;

pub const USERS: &str = "utenti";
pub const UNITS: &str = "unita";
pub const ACTIVITIES: &str = "attivita";
pub const MEMBERS: &str = "membri";
pub const SETTINGS: &str = "impostazioni";

// ============================================================================
// Call log
// ============================================================================

/// A request received by the in-memory store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    List { table: &'static str, filter: QueryFilter },
    /// Single-row lookup by a non-id key (auth id, email)
    Lookup { table: &'static str, key: String },
    Find { table: &'static str, id: i64 },
    Write { table: &'static str, op: &'static str, id: Option<i64> },
}

impl StoreCall {
    pub fn table(&self) -> &'static str {
        match self {
            Self::List { table, .. }
            | Self::Lookup { table, .. }
            | Self::Find { table, .. }
            | Self::Write { table, .. } => table,
        }
    }

    /// Whether this call could have returned rows belonging to `unit_id`
    pub fn reaches_unit(&self, unit_id: UnitId) -> bool {
        match self {
            Self::List { filter, .. } => filter.matches(unit_id),
            Self::Find { table, id } => *table == UNITS && *id == unit_id.into_inner(),
            Self::Lookup { .. } | Self::Write { .. } => false,
        }
    }
}

// ============================================================================
// Store
// ============================================================================

#[derive(Default)]
struct StoreState {
    users: Vec<User>,
    units: Vec<Unit>,
    activities: Vec<Activity>,
    members: Vec<Member>,
    settings: Vec<Setting>,
    next_id: i64,
    calls: Vec<StoreCall>,
    held_units: HashMap<UnitId, Arc<Notify>>,
    held_lookups: Option<Arc<Notify>>,
    failing: HashSet<&'static str>,
}

impl StoreState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        1000 + self.next_id
    }

    fn check(&self, table: &'static str) -> RepoResult<()> {
        if self.failing.contains(table) {
            return Err(DomainError::BackendError(format!("{table} unavailable")));
        }
        Ok(())
    }
}

/// Shared in-memory backend for every repository
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // === Seeding ===

    pub fn seed_user(&self, user: User) {
        self.state.lock().users.push(user);
    }

    pub fn seed_unit(&self, unit: Unit) {
        self.state.lock().units.push(unit);
    }

    pub fn seed_activity(&self, activity: Activity) {
        self.state.lock().activities.push(activity);
    }

    pub fn seed_member(&self, member: Member) {
        self.state.lock().members.push(member);
    }

    pub fn seed_setting(&self, setting: Setting) {
        self.state.lock().settings.push(setting);
    }

    // === Inspection ===

    pub fn calls(&self) -> Vec<StoreCall> {
        self.state.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    /// Calls that could have returned rows of `unit_id`
    pub fn calls_reaching(&self, unit_id: UnitId) -> Vec<StoreCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.reaches_unit(unit_id))
            .collect()
    }

    pub fn user(&self, id: RowId) -> Option<User> {
        self.state.lock().users.iter().find(|u| u.id == Some(id)).cloned()
    }

    pub fn unit(&self, id: UnitId) -> Option<Unit> {
        self.state.lock().units.iter().find(|u| u.id == id).cloned()
    }

    pub fn member(&self, id: RowId) -> Option<Member> {
        self.state.lock().members.iter().find(|m| m.id == id).cloned()
    }

    pub fn activity_count(&self) -> usize {
        self.state.lock().activities.len()
    }

    // === Fault injection ===

    /// Make unit lookups for `unit_id` wait until [`Self::release_unit`]
    pub fn hold_unit(&self, unit_id: UnitId) {
        self.state
            .lock()
            .held_units
            .insert(unit_id, Arc::new(Notify::new()));
    }

    pub fn release_unit(&self, unit_id: UnitId) {
        if let Some(gate) = self.state.lock().held_units.remove(&unit_id) {
            gate.notify_one();
        }
    }

    /// Make profile lookups (by auth id or email) wait until
    /// [`Self::release_profile_lookups`]
    pub fn hold_profile_lookups(&self) {
        self.state.lock().held_lookups = Some(Arc::new(Notify::new()));
    }

    pub fn release_profile_lookups(&self) {
        if let Some(gate) = self.state.lock().held_lookups.take() {
            gate.notify_one();
        }
    }

    /// Make every request against `table` fail
    pub fn fail_table(&self, table: &'static str) {
        self.state.lock().failing.insert(table);
    }

    // === Repositories ===

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        Arc::new(MemoryUsers(self.clone()))
    }

    pub fn unit_repo(&self) -> Arc<dyn UnitRepository> {
        Arc::new(MemoryUnits(self.clone()))
    }

    pub fn activity_repo(&self) -> Arc<dyn ActivityRepository> {
        Arc::new(MemoryActivities(self.clone()))
    }

    pub fn member_repo(&self) -> Arc<dyn MemberRepository> {
        Arc::new(MemoryMembers(self.clone()))
    }

    pub fn setting_repo(&self) -> Arc<dyn SettingRepository> {
        Arc::new(MemorySettings(self.clone()))
    }

    fn record(&self, call: StoreCall) -> parking_lot::MutexGuard<'_, StoreState> {
        let mut state = self.state.lock();
        state.calls.push(call);
        state
    }

    fn list_call(&self, table: &'static str, filter: &QueryFilter) -> parking_lot::MutexGuard<'_, StoreState> {
        self.record(StoreCall::List {
            table,
            filter: filter.clone(),
        })
    }

    fn find_call(&self, table: &'static str, id: i64) -> parking_lot::MutexGuard<'_, StoreState> {
        self.record(StoreCall::Find { table, id })
    }

    fn write_call(
        &self,
        table: &'static str,
        op: &'static str,
        id: Option<i64>,
    ) -> parking_lot::MutexGuard<'_, StoreState> {
        self.record(StoreCall::Write { table, op, id })
    }
}

// ============================================================================
// Users
// ============================================================================

struct MemoryUsers(MemoryStore);

impl MemoryUsers {
    async fn wait_for_lookup(&self, key: String) {
        let gate = {
            let state = self.0.record(StoreCall::Lookup { table: USERS, key });
            state.held_lookups.clone()
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn find_by_auth_id(&self, auth_id: Uuid) -> RepoResult<Option<User>> {
        self.wait_for_lookup(auth_id.to_string()).await;
        let state = self.0.state.lock();
        state.check(USERS)?;
        Ok(state.users.iter().find(|u| u.auth_id == Some(auth_id)).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        self.wait_for_lookup(email.to_string()).await;
        let state = self.0.state.lock();
        state.check(USERS)?;
        Ok(state
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_id(&self, id: RowId) -> RepoResult<Option<User>> {
        let state = self.0.find_call(USERS, id.into_inner());
        state.check(USERS)?;
        Ok(state.users.iter().find(|u| u.id == Some(id)).cloned())
    }

    async fn list(&self, filter: &QueryFilter) -> RepoResult<Vec<User>> {
        let state = self.0.list_call(USERS, filter);
        state.check(USERS)?;
        let mut users: Vec<User> = state
            .users
            .iter()
            .filter(|u| match filter {
                QueryFilter::NoFilter => true,
                _ => u.home_unit_id.is_some_and(|id| filter.matches(id)),
            })
            .cloned()
            .collect();
        users.sort_by(|a, b| {
            (a.last_name.as_str(), a.first_name.as_str())
                .cmp(&(b.last_name.as_str(), b.first_name.as_str()))
        });
        Ok(users)
    }

    async fn link_auth_id(&self, id: RowId, auth_id: Uuid) -> RepoResult<()> {
        let mut state = self.0.write_call(USERS, "link_auth_id", Some(id.into_inner()));
        state.check(USERS)?;
        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == Some(id))
            .ok_or_else(|| DomainError::UserNotFound(id.to_string()))?;
        user.auth_id = Some(auth_id);
        Ok(())
    }

    async fn update_access(
        &self,
        id: RowId,
        roles: UserRoles,
        visible_unit_ids: &[UnitId],
    ) -> RepoResult<()> {
        let mut state = self.0.write_call(USERS, "update_access", Some(id.into_inner()));
        state.check(USERS)?;
        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == Some(id))
            .ok_or_else(|| DomainError::UserNotFound(id.to_string()))?;
        user.roles = roles;
        user.visible_unit_ids = visible_unit_ids.to_vec();
        Ok(())
    }
}

// ============================================================================
// Units
// ============================================================================

struct MemoryUnits(MemoryStore);

#[async_trait]
impl UnitRepository for MemoryUnits {
    async fn find_by_id(&self, id: UnitId) -> RepoResult<Option<Unit>> {
        let gate = {
            let state = self.0.find_call(UNITS, id.into_inner());
            state.check(UNITS)?;
            state.held_units.get(&id).cloned()
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }
        Ok(self.0.unit(id))
    }

    async fn list(&self, filter: &QueryFilter) -> RepoResult<Vec<Unit>> {
        let state = self.0.list_call(UNITS, filter);
        state.check(UNITS)?;
        let mut units: Vec<Unit> = state
            .units
            .iter()
            .filter(|u| filter.matches(u.id))
            .cloned()
            .collect();
        units.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(units)
    }

    async fn create(&self, unit: &NewUnit) -> RepoResult<Unit> {
        let mut state = self.0.write_call(UNITS, "create", None);
        state.check(UNITS)?;
        let id = UnitId::new(state.next_id());
        let created = Unit {
            id,
            name: unit.name.clone(),
            leader_id: unit.leader_id,
            helper_ids: unit.helper_ids.clone(),
            member_count: unit.member_count,
        };
        state.units.push(created.clone());
        Ok(created)
    }

    async fn update(&self, unit: &Unit) -> RepoResult<()> {
        let mut state = self.0.write_call(UNITS, "update", Some(unit.id.into_inner()));
        state.check(UNITS)?;
        let slot = state
            .units
            .iter_mut()
            .find(|u| u.id == unit.id)
            .ok_or(DomainError::UnitNotFound(unit.id))?;
        *slot = unit.clone();
        Ok(())
    }

    async fn delete(&self, id: UnitId) -> RepoResult<()> {
        let mut state = self.0.write_call(UNITS, "delete", Some(id.into_inner()));
        state.check(UNITS)?;
        let before = state.units.len();
        state.units.retain(|u| u.id != id);
        if state.units.len() == before {
            return Err(DomainError::UnitNotFound(id));
        }
        Ok(())
    }

    async fn set_member_count(&self, id: UnitId, count: i64) -> RepoResult<()> {
        let mut state = self.0.write_call(UNITS, "set_member_count", Some(id.into_inner()));
        state.check(UNITS)?;
        let unit = state
            .units
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(DomainError::UnitNotFound(id))?;
        unit.member_count = count;
        Ok(())
    }
}

// ============================================================================
// Activities
// ============================================================================

struct MemoryActivities(MemoryStore);

fn activity_from(id: RowId, draft: &ActivityDraft) -> Activity {
    Activity {
        id,
        unit_id: draft.unit_id,
        title: draft.title.clone(),
        objectives: draft.objectives.clone(),
        date: draft.date,
        achieved: draft.achieved.clone(),
        schedule: draft.schedule.clone(),
    }
}

#[async_trait]
impl ActivityRepository for MemoryActivities {
    async fn list(&self, filter: &QueryFilter) -> RepoResult<Vec<Activity>> {
        let state = self.0.list_call(ACTIVITIES, filter);
        state.check(ACTIVITIES)?;
        let mut rows: Vec<Activity> = state
            .activities
            .iter()
            .filter(|a| filter.matches(a.unit_id))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(rows)
    }

    async fn list_in_range(
        &self,
        filter: &QueryFilter,
        from: NaiveDate,
        to: NaiveDate,
    ) -> RepoResult<Vec<Activity>> {
        let state = self.0.list_call(ACTIVITIES, filter);
        state.check(ACTIVITIES)?;
        let mut rows: Vec<Activity> = state
            .activities
            .iter()
            .filter(|a| filter.matches(a.unit_id) && a.date >= from && a.date <= to)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(rows)
    }

    async fn find_by_id(&self, id: RowId) -> RepoResult<Option<Activity>> {
        let state = self.0.find_call(ACTIVITIES, id.into_inner());
        state.check(ACTIVITIES)?;
        Ok(state.activities.iter().find(|a| a.id == id).cloned())
    }

    async fn create(&self, draft: &ActivityDraft) -> RepoResult<Activity> {
        let mut state = self.0.write_call(ACTIVITIES, "create", None);
        state.check(ACTIVITIES)?;
        let activity = activity_from(RowId::new(state.next_id()), draft);
        state.activities.push(activity.clone());
        Ok(activity)
    }

    async fn update(&self, id: RowId, draft: &ActivityDraft) -> RepoResult<()> {
        let mut state = self.0.write_call(ACTIVITIES, "update", Some(id.into_inner()));
        state.check(ACTIVITIES)?;
        let slot = state
            .activities
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(DomainError::ActivityNotFound(id))?;
        *slot = activity_from(id, draft);
        Ok(())
    }

    async fn delete(&self, id: RowId) -> RepoResult<()> {
        let mut state = self.0.write_call(ACTIVITIES, "delete", Some(id.into_inner()));
        state.check(ACTIVITIES)?;
        let before = state.activities.len();
        state.activities.retain(|a| a.id != id);
        if state.activities.len() == before {
            return Err(DomainError::ActivityNotFound(id));
        }
        Ok(())
    }
}

// ============================================================================
// Members
// ============================================================================

struct MemoryMembers(MemoryStore);

fn member_from(id: RowId, draft: &MemberDraft) -> Member {
    Member {
        id,
        unit_id: draft.unit_id,
        first_name: draft.first_name.clone(),
        last_name: draft.last_name.clone(),
        year: draft.year,
        role: draft.role.clone(),
        objectives: draft.objectives.clone(),
    }
}

#[async_trait]
impl MemberRepository for MemoryMembers {
    async fn list(&self, filter: &QueryFilter) -> RepoResult<Vec<Member>> {
        let state = self.0.list_call(MEMBERS, filter);
        state.check(MEMBERS)?;
        let mut rows: Vec<Member> = state
            .members
            .iter()
            .filter(|m| filter.matches(m.unit_id))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            (a.last_name.as_str(), a.first_name.as_str())
                .cmp(&(b.last_name.as_str(), b.first_name.as_str()))
        });
        Ok(rows)
    }

    async fn find_by_id(&self, id: RowId) -> RepoResult<Option<Member>> {
        let state = self.0.find_call(MEMBERS, id.into_inner());
        state.check(MEMBERS)?;
        Ok(state.members.iter().find(|m| m.id == id).cloned())
    }

    async fn create(&self, draft: &MemberDraft) -> RepoResult<Member> {
        let mut state = self.0.write_call(MEMBERS, "create", None);
        state.check(MEMBERS)?;
        let member = member_from(RowId::new(state.next_id()), draft);
        state.members.push(member.clone());
        Ok(member)
    }

    async fn update(&self, id: RowId, draft: &MemberDraft) -> RepoResult<()> {
        let mut state = self.0.write_call(MEMBERS, "update", Some(id.into_inner()));
        state.check(MEMBERS)?;
        let slot = state
            .members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(DomainError::MemberNotFound(id))?;
        *slot = member_from(id, draft);
        Ok(())
    }

    async fn update_objectives(&self, id: RowId, objectives: &[Objective]) -> RepoResult<()> {
        let mut state = self.0.write_call(MEMBERS, "update_objectives", Some(id.into_inner()));
        state.check(MEMBERS)?;
        let member = state
            .members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(DomainError::MemberNotFound(id))?;
        member.objectives = objectives.to_vec();
        Ok(())
    }

    async fn delete(&self, id: RowId) -> RepoResult<()> {
        let mut state = self.0.write_call(MEMBERS, "delete", Some(id.into_inner()));
        state.check(MEMBERS)?;
        let before = state.members.len();
        state.members.retain(|m| m.id != id);
        if state.members.len() == before {
            return Err(DomainError::MemberNotFound(id));
        }
        Ok(())
    }

    async fn count(&self, filter: &QueryFilter) -> RepoResult<i64> {
        let state = self.0.list_call(MEMBERS, filter);
        state.check(MEMBERS)?;
        let count = state
            .members
            .iter()
            .filter(|m| filter.matches(m.unit_id))
            .count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }
}

// ============================================================================
// Settings
// ============================================================================

struct MemorySettings(MemoryStore);

#[async_trait]
impl SettingRepository for MemorySettings {
    async fn list(&self, filter: &QueryFilter) -> RepoResult<Vec<Setting>> {
        let state = self.0.list_call(SETTINGS, filter);
        state.check(SETTINGS)?;
        let mut rows: Vec<Setting> = state
            .settings
            .iter()
            .filter(|s| filter.matches(s.unit_id))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(rows)
    }

    async fn find_by_id(&self, id: RowId) -> RepoResult<Option<Setting>> {
        let state = self.0.find_call(SETTINGS, id.into_inner());
        state.check(SETTINGS)?;
        Ok(state.settings.iter().find(|s| s.id == id).cloned())
    }

    async fn create(&self, setting: &NewSetting) -> RepoResult<Setting> {
        let mut state = self.0.write_call(SETTINGS, "create", None);
        state.check(SETTINGS)?;
        let created = Setting {
            id: RowId::new(state.next_id()),
            unit_id: setting.unit_id,
            key: setting.key.clone(),
            value: setting.value.clone(),
        };
        state.settings.push(created.clone());
        Ok(created)
    }

    async fn update_value(&self, id: RowId, value: &str) -> RepoResult<()> {
        let mut state = self.0.write_call(SETTINGS, "update_value", Some(id.into_inner()));
        state.check(SETTINGS)?;
        let setting = state
            .settings
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(DomainError::SettingNotFound(id))?;
        setting.value = value.to_string();
        Ok(())
    }

    async fn delete(&self, id: RowId) -> RepoResult<()> {
        let mut state = self.0.write_call(SETTINGS, "delete", Some(id.into_inner()));
        state.check(SETTINGS)?;
        let before = state.settings.len();
        state.settings.retain(|s| s.id != id);
        if state.settings.len() == before {
            return Err(DomainError::SettingNotFound(id));
        }
        Ok(())
    }
}

// ============================================================================
// Auth
// ============================================================================

struct Account {
    password: String,
    user: AuthUser,
}

/// Auth service double with accounts held in memory
pub struct FakeAuth {
    accounts: Mutex<HashMap<String, Account>>,
    session: Mutex<Option<AuthSession>>,
    session_failure: Mutex<Option<AuthError>>,
    confirm_on_sign_up: bool,
    events: broadcast::Sender<AuthEvent>,
}

impl Default for FakeAuth {
    fn default() -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            accounts: Mutex::new(HashMap::new()),
            session: Mutex::new(None),
            session_failure: Mutex::new(None),
            confirm_on_sign_up: true,
            events,
        }
    }
}

impl FakeAuth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign-ups open a session straight away instead of asking for
    /// email confirmation
    pub fn without_email_confirmation(mut self) -> Self {
        self.confirm_on_sign_up = false;
        self
    }

    /// Register an account and return its identity
    pub fn add_account(&self, email: &str, password: &str, auth_id: Uuid) -> AuthUser {
        let user = AuthUser {
            id: auth_id,
            email: email.to_string(),
            metadata: ProfileMetadata::default(),
        };
        self.accounts.lock().insert(
            email.to_lowercase(),
            Account {
                password: password.to_string(),
                user: user.clone(),
            },
        );
        user
    }

    /// Open a session for `user` without going through sign-in
    pub fn set_session(&self, user: AuthUser) -> AuthSession {
        let session = session_for(user);
        *self.session.lock() = Some(session.clone());
        session
    }

    /// Make `current_session` fail with `error`
    pub fn fail_sessions(&self, error: AuthError) {
        *self.session_failure.lock() = Some(error);
    }

    /// Drop the session as the auth service would on remote sign-out
    pub fn revoke_session(&self) {
        *self.session.lock() = None;
        let _ = self.events.send(AuthEvent::SignedOut);
    }

    pub fn session(&self) -> Option<AuthSession> {
        self.session.lock().clone()
    }

    pub fn metadata_for(&self, email: &str) -> Option<ProfileMetadata> {
        self.accounts
            .lock()
            .get(&email.to_lowercase())
            .map(|a| a.user.metadata.clone())
    }

    fn install(&self, session: AuthSession) -> AuthSession {
        *self.session.lock() = Some(session.clone());
        let _ = self
            .events
            .send(AuthEvent::SignedIn(Box::new(session.clone())));
        session
    }
}

fn session_for(user: AuthUser) -> AuthSession {
    AuthSession {
        access_token: format!("access-{}", user.id),
        refresh_token: Some(format!("refresh-{}", user.id)),
        expires_at: Utc::now() + Duration::hours(1),
        user,
    }
}

#[async_trait]
impl AuthProvider for FakeAuth {
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        let user = {
            let accounts = self.accounts.lock();
            match accounts.get(&email.to_lowercase()) {
                Some(account) if account.password == password => account.user.clone(),
                _ => return Err(AuthError::InvalidCredentials),
            }
        };
        Ok(self.install(session_for(user)))
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        profile: &ProfileMetadata,
    ) -> AuthResult<SignUpOutcome> {
        let user = {
            let mut accounts = self.accounts.lock();
            let key = email.to_lowercase();
            if accounts.contains_key(&key) {
                return Err(AuthError::AlreadyRegistered);
            }
            let user = AuthUser {
                id: Uuid::new_v4(),
                email: email.to_string(),
                metadata: profile.clone(),
            };
            accounts.insert(
                key,
                Account {
                    password: password.to_string(),
                    user: user.clone(),
                },
            );
            user
        };

        if self.confirm_on_sign_up {
            return Ok(SignUpOutcome::ConfirmationRequired);
        }
        Ok(SignUpOutcome::SignedIn(Box::new(self.install(session_for(user)))))
    }

    async fn current_session(&self) -> AuthResult<Option<AuthSession>> {
        if let Some(error) = self.session_failure.lock().clone() {
            return Err(error);
        }
        Ok(self.session.lock().clone())
    }

    async fn sign_out(&self) -> AuthResult<()> {
        *self.session.lock() = None;
        let _ = self.events.send(AuthEvent::SignedOut);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }
}
