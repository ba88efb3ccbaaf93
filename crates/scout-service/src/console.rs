//! Console controller
//!
//! Owns the session: the signed-in profile, the selected unit and the
//! calendar month. All three live in one [`SessionContext`] behind a mutex
//! that is only held between awaits, never across one.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use parking_lot::Mutex;
use scout_core::{AccessScope, AuthEvent, UnitId};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

use crate::calendar::{CalendarGrid, CalendarMonth};
use crate::dto::{ConsoleCapabilities, LoginNotice, UnitOption};
use crate::selection::{SelectionTracker, UnitPanel, UnitSelection};
use crate::services::{
    login_notice, ActivityService, AuthService, LoadedProfile, ProfileService, ServiceContext,
    ServiceResult, UnitService,
};

/// Why the console is showing the login view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggedOutReason {
    /// The auth service failed while looking up the session
    SessionError,
    /// Nobody is signed in
    NoSession,
    /// The session carries no usable identity
    NoUser,
    /// Loading the profile or the unit list failed
    InitError,
    /// The auth service reported the session ended
    SignedOut { event: &'static str },
}

impl LoggedOutReason {
    pub fn code(self) -> &'static str {
        match self {
            Self::SessionError => "session_error",
            Self::NoSession => "no_session",
            Self::NoUser => "no_user",
            Self::InitError => "init_error",
            Self::SignedOut { .. } => "signed_out",
        }
    }

    pub fn event(self) -> Option<&'static str> {
        match self {
            Self::SignedOut { event } => Some(event),
            _ => None,
        }
    }

    /// Notice for the login view
    pub fn notice(self) -> LoginNotice {
        login_notice(None, Some(self.code()), self.event()).unwrap_or_else(|| LoginNotice {
            kind: crate::dto::NoticeKind::Error,
            text: self.code().to_string(),
        })
    }
}

/// Top-level console state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleState {
    /// `start` has not completed yet
    #[default]
    Starting,
    Ready,
    LoggedOut(LoggedOutReason),
}

/// Process-wide session state
#[derive(Debug, Default)]
pub struct SessionContext {
    pub state: ConsoleState,
    pub profile: Option<LoadedProfile>,
    pub units: Vec<UnitOption>,
    pub selection: UnitSelection,
    pub month: Option<CalendarMonth>,
    selections: SelectionTracker,
    calendar_loads: SelectionTracker,
    // bumped on every reset; a startup only commits into the generation it began in
    generation: u64,
}

impl SessionContext {
    fn scope(&self) -> AccessScope {
        self.profile
            .as_ref()
            .map_or_else(AccessScope::empty, |p| p.scope.clone())
    }

    /// Forget everything tied to the signed-in user
    fn reset(&mut self, state: ConsoleState) {
        self.state = state;
        self.profile = None;
        self.units.clear();
        self.selection = UnitSelection::NoUnitSelected;
        self.selections.issue();
        self.calendar_loads.issue();
        self.generation += 1;
    }

    fn log_out(&mut self, reason: LoggedOutReason) -> ConsoleState {
        info!(reason = reason.code(), "Console logged out");
        let state = ConsoleState::LoggedOut(reason);
        self.reset(state);
        state
    }
}

/// Drives the console: startup, unit selection, month navigation and
/// reaction to auth events
pub struct ConsoleController {
    ctx: ServiceContext,
    session: Mutex<SessionContext>,
    today: Option<NaiveDate>,
}

impl ConsoleController {
    pub fn new(ctx: ServiceContext) -> Self {
        Self {
            ctx,
            session: Mutex::new(SessionContext::default()),
            today: None,
        }
    }

    /// Pin "today" instead of reading the local clock
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn context(&self) -> &ServiceContext {
        &self.ctx
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    // === Snapshots ===

    pub fn state(&self) -> ConsoleState {
        self.session.lock().state
    }

    pub fn selection(&self) -> UnitSelection {
        self.session.lock().selection.clone()
    }

    pub fn profile(&self) -> Option<LoadedProfile> {
        self.session.lock().profile.clone()
    }

    pub fn units(&self) -> Vec<UnitOption> {
        self.session.lock().units.clone()
    }

    pub fn scope(&self) -> AccessScope {
        self.session.lock().scope()
    }

    pub fn capabilities(&self) -> ConsoleCapabilities {
        self.session
            .lock()
            .profile
            .as_ref()
            .map(LoadedProfile::capabilities)
            .unwrap_or_default()
    }

    pub fn month(&self) -> CalendarMonth {
        let month = self.session.lock().month;
        month.unwrap_or_else(|| CalendarMonth::containing(self.today()))
    }

    // === Startup ===

    /// Run the startup sequence
    ///
    /// Looks up the session, loads the profile and the visible units, then
    /// selects the first unit when there is one. A sign-out that lands while
    /// startup is still loading wins; the loaded profile is discarded.
    #[instrument(skip(self))]
    pub async fn start(&self) -> ConsoleState {
        let generation = self.session.lock().generation;

        let session = match self.ctx.auth().current_session().await {
            Ok(Some(session)) => session,
            Ok(None) => return self.abandon_start(generation, LoggedOutReason::NoSession),
            Err(e) => {
                warn!(error = %e, "Session lookup failed");
                return self.abandon_start(generation, LoggedOutReason::SessionError);
            }
        };

        if session.user.id.is_nil() {
            return self.abandon_start(generation, LoggedOutReason::NoUser);
        }

        let profile = match ProfileService::new(&self.ctx).load(&session.user).await {
            Ok(profile) => profile,
            Err(e) => {
                error!(error = %e, "Profile load failed");
                return self.abandon_start(generation, LoggedOutReason::InitError);
            }
        };
        let superseded = self.session.lock().generation != generation;
        if superseded {
            debug!("Session changed during profile load, stopping startup");
            return self.state();
        }

        let units = match UnitService::new(&self.ctx).visible_units(&profile.scope).await {
            Ok(units) => units,
            Err(e) => {
                error!(error = %e, "Unit list load failed");
                return self.abandon_start(generation, LoggedOutReason::InitError);
            }
        };

        let first_unit = units.first().map(|u| u.id);

        {
            let mut session = self.session.lock();
            if session.generation != generation {
                info!(state = ?session.state, "Session changed during startup, discarding profile");
                return session.state;
            }
            info!(
                user = %profile.user.email,
                units = units.len(),
                incomplete = profile.incomplete,
                "Console ready"
            );
            session.reset(ConsoleState::Ready);
            session.profile = Some(profile);
            session.units = units;
            if session.month.is_none() {
                session.month = Some(CalendarMonth::containing(self.today()));
            }
        }

        if first_unit.is_some() {
            self.select_unit(first_unit).await;
        }
        self.state()
    }

    fn log_out(&self, reason: LoggedOutReason) -> ConsoleState {
        self.session.lock().log_out(reason)
    }

    /// Log out from a failed startup, unless something else already reset
    /// the session in the meantime
    fn abandon_start(&self, generation: u64, reason: LoggedOutReason) -> ConsoleState {
        let mut session = self.session.lock();
        if session.generation == generation {
            session.log_out(reason)
        } else {
            session.state
        }
    }

    // === Auth events ===

    /// Apply an auth event; returns the new state when it changed
    pub fn handle_auth_event(&self, event: &AuthEvent) -> Option<ConsoleState> {
        match event {
            AuthEvent::SignedOut => Some(self.log_out(LoggedOutReason::SignedOut {
                event: event.name(),
            })),
            AuthEvent::SignedIn(_) | AuthEvent::TokenRefreshed(_) => {
                debug!(event = event.name(), "Auth event");
                None
            }
        }
    }

    /// Follow auth events until the provider drops the channel
    pub fn spawn_auth_listener(self: &Arc<Self>) -> JoinHandle<()> {
        let mut events = self.ctx.auth().subscribe();
        let controller = Arc::clone(self);

        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => {
                        controller.handle_auth_event(&event);
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Auth listener lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }

    #[instrument(skip(self))]
    pub async fn sign_out(&self) -> ServiceResult<ConsoleState> {
        AuthService::new(&self.ctx).sign_out().await?;
        Ok(self.log_out(LoggedOutReason::SignedOut {
            event: AuthEvent::SignedOut.name(),
        }))
    }

    // === Unit selection ===

    /// Select a unit, or clear the selection with `None`
    ///
    /// Units outside the scope fail without any request being made for
    /// them. When selections overlap, only the latest one commits. A month
    /// change made while the unit was loading is applied before committing.
    #[instrument(skip(self))]
    pub async fn select_unit(&self, unit_id: Option<UnitId>) -> UnitSelection {
        let today = self.today();
        let (ticket, scope, month, unit_id) = {
            let mut session = self.session.lock();
            let ticket = session.selections.issue();
            let Some(unit_id) = unit_id else {
                session.selection = UnitSelection::NoUnitSelected;
                return session.selection.clone();
            };
            if session.state != ConsoleState::Ready {
                session.selection = UnitSelection::UnitLoadFailed {
                    unit_id: Some(unit_id),
                    error: "Not signed in".to_string(),
                };
                return session.selection.clone();
            }

            session.selection = UnitSelection::LoadingUnit { unit_id, ticket };
            let month = session
                .month
                .unwrap_or_else(|| CalendarMonth::containing(today));
            (ticket, session.scope(), month, unit_id)
        };

        let mut result = UnitPanel::load(&self.ctx, &scope, unit_id, month, today).await;

        loop {
            let (mut panel, wanted) = {
                let mut session = self.session.lock();
                if !session.selections.is_current(ticket) {
                    debug!(unit_id = %unit_id, "Selection superseded, dropping result");
                    return session.selection.clone();
                }

                let wanted = session.month.unwrap_or(month);
                match result {
                    Ok(panel) if panel.calendar.month != wanted => (panel, wanted),
                    Ok(panel) => {
                        session.selection = UnitSelection::UnitSelected(Box::new(panel));
                        return session.selection.clone();
                    }
                    Err(e) => {
                        warn!(unit_id = %unit_id, error = %e, "Unit load failed");
                        session.selection = UnitSelection::UnitLoadFailed {
                            unit_id: Some(unit_id),
                            error: e.to_string(),
                        };
                        return session.selection.clone();
                    }
                }
            };

            debug!(unit_id = %unit_id, month = ?wanted, "Month changed while loading, refreshing calendar");
            result = ActivityService::new(&self.ctx)
                .in_month(&scope, unit_id, wanted)
                .await
                .map(|activities| {
                    panel.calendar = CalendarGrid::build(wanted, today, &activities);
                    panel
                });
        }
    }

    /// Select from a raw picker value; blank clears the selection
    pub async fn select_unit_value(&self, raw: &str) -> UnitSelection {
        if raw.trim().is_empty() {
            return self.select_unit(None).await;
        }

        match UnitId::parse(raw) {
            Ok(unit_id) => self.select_unit(Some(unit_id)).await,
            Err(e) => {
                warn!(value = raw, "Rejected malformed unit selection");
                let mut session = self.session.lock();
                session.selections.issue();
                session.selection = UnitSelection::UnitLoadFailed {
                    unit_id: None,
                    error: e.to_string(),
                };
                session.selection.clone()
            }
        }
    }

    /// Reload the selected unit, e.g. after an edit
    pub async fn reload_unit(&self) -> UnitSelection {
        let unit_id = self.session.lock().selection.unit_id();
        self.select_unit(unit_id).await
    }

    // === Calendar ===

    /// Move the calendar by `delta` months and reload the selected unit's
    /// month
    ///
    /// Returns the new grid, or `None` when no unit panel is shown or a
    /// newer navigation or selection overtook this one. While a unit is
    /// still loading only the month is recorded; that load picks it up
    /// before committing.
    #[instrument(skip(self))]
    pub async fn change_month(&self, delta: i32) -> ServiceResult<Option<CalendarGrid>> {
        let today = self.today();
        let (month, ticket, selection_unit, scope) = {
            let mut session = self.session.lock();
            let month = session
                .month
                .unwrap_or_else(|| CalendarMonth::containing(today))
                .shift(delta);
            session.month = Some(month);
            let ticket = session.calendar_loads.issue();
            let unit = session.selection.panel().map(|p| p.unit.id);
            (month, ticket, unit, session.scope())
        };

        let Some(unit_id) = selection_unit else {
            return Ok(None);
        };

        let activities = ActivityService::new(&self.ctx)
            .in_month(&scope, unit_id, month)
            .await?;
        let grid = CalendarGrid::build(month, today, &activities);

        let mut session = self.session.lock();
        if !session.calendar_loads.is_current(ticket) {
            return Ok(None);
        }
        match session.selection.panel_mut() {
            Some(panel) if panel.unit.id == unit_id => {
                panel.calendar = grid.clone();
                Ok(Some(grid))
            }
            _ => Ok(None),
        }
    }
}
