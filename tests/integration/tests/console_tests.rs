//! Console scenarios against the in-memory backend
//!
//! Run with: cargo test -p integration-tests --test console_tests

use std::sync::Arc;

use integration_tests::*;
use scout_core::{AuthError, AuthUser, ProfileMetadata, QueryFilter};
use scout_service::{ConsoleState, LoggedOutReason, UnitSelection};
use uuid::Uuid;

fn selected_unit(selection: &UnitSelection) -> Option<scout_core::UnitId> {
    selection.panel().map(|p| p.unit.id)
}

// ============================================================================
// Startup
// ============================================================================

#[tokio::test]
async fn test_admin_sees_every_unit() {
    let world = TestWorld::seeded();
    world.sign_in_as(&admin_user());
    let console = world.controller();

    assert_eq!(console.start().await, ConsoleState::Ready);

    let names: Vec<String> = console.units().into_iter().map(|u| u.name).collect();
    assert_eq!(names, ["Branco Lupi", "Clan Orsi", "Reparto Aquile"]);
    assert!(world.store.calls().contains(&StoreCall::List {
        table: UNITS,
        filter: QueryFilter::NoFilter,
    }));

    let caps = console.capabilities();
    assert!(caps.site_admin_tab);
    assert!(caps.registration_links);

    // First unit is selected automatically
    assert_eq!(selected_unit(&console.selection()), Some(LUPI));
}

#[tokio::test]
async fn test_scoped_user_loads_unit_panel() {
    let world = TestWorld::seeded();
    world.sign_in_as(&leader_user());
    let console = world.controller();

    assert_eq!(console.start().await, ConsoleState::Ready);
    assert_eq!(console.units().len(), 1);

    let selection = console.selection();
    let panel = selection.panel().expect("unit panel loaded");
    assert_eq!(panel.unit.id, AQUILE);

    let titles: Vec<&str> = panel.activities.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(
        titles,
        ["Campo di primavera", "Riunione di reparto", "Uscita al lago"]
    );

    let members: Vec<&str> = panel.members.iter().map(|m| m.last_name.as_str()).collect();
    assert_eq!(members, ["Colombo", "Ferrari"]);
    assert_eq!(panel.settings.len(), 1);

    assert_eq!(panel.calendar.label, "March 2025");
    let busy_days: Vec<u32> = panel
        .calendar
        .month_cells()
        .filter(|c| !c.activities.is_empty())
        .map(|c| c.day)
        .collect();
    assert_eq!(busy_days, [8, 22]);

    let caps = console.capabilities();
    assert!(caps.unit_admin_tab);
    assert!(!caps.site_admin_tab);
}

#[tokio::test]
async fn test_scoped_user_never_reaches_other_units() {
    let world = TestWorld::seeded();
    world.sign_in_as(&leader_user());
    let console = world.controller();
    console.start().await;

    assert!(world.store.calls_reaching(ORSI).is_empty());
    assert!(world.store.calls_reaching(LUPI).is_empty());
}

#[tokio::test]
async fn test_without_session_console_logs_out() {
    let world = TestWorld::seeded();
    let console = world.controller();

    assert_eq!(
        console.start().await,
        ConsoleState::LoggedOut(LoggedOutReason::NoSession)
    );
    assert!(world.store.calls().is_empty());
}

#[tokio::test]
async fn test_session_failure_reports_session_error() {
    let world = TestWorld::seeded();
    world.sign_in_as(&leader_user());
    world.auth.fail_sessions(AuthError::Unavailable("timeout".to_string()));
    let console = world.controller();

    let state = console.start().await;
    assert_eq!(state, ConsoleState::LoggedOut(LoggedOutReason::SessionError));
    assert!(LoggedOutReason::SessionError
        .notice()
        .text
        .starts_with("An error occurred."));
}

#[tokio::test]
async fn test_nil_identity_reports_no_user() {
    let world = TestWorld::seeded();
    world.auth.set_session(AuthUser {
        id: Uuid::nil(),
        email: "ghost@example.com".to_string(),
        metadata: ProfileMetadata::default(),
    });
    let console = world.controller();

    assert_eq!(
        console.start().await,
        ConsoleState::LoggedOut(LoggedOutReason::NoUser)
    );
}

#[tokio::test]
async fn test_backend_failure_reports_init_error() {
    let world = TestWorld::seeded();
    world.sign_in_as(&leader_user());
    world.store.fail_table(UNITS);
    let console = world.controller();

    assert_eq!(
        console.start().await,
        ConsoleState::LoggedOut(LoggedOutReason::InitError)
    );
    assert!(console.profile().is_none());
}

#[tokio::test]
async fn test_unknown_account_gets_provisional_profile() {
    let world = TestWorld::seeded();
    world.auth.set_session(AuthUser {
        id: Uuid::new_v4(),
        email: "martina.galli@example.com".to_string(),
        metadata: ProfileMetadata::default(),
    });
    let console = world.controller();

    assert_eq!(console.start().await, ConsoleState::Ready);

    let profile = console.profile().expect("provisional profile");
    assert!(profile.incomplete);
    assert_eq!(profile.user.first_name, "martina.galli");
    assert!(profile.scope.is_empty());
    assert!(console.units().is_empty());
    assert_eq!(console.selection(), UnitSelection::NoUnitSelected);

    // An empty scope never queries the unit table
    assert!(!world
        .store
        .calls()
        .iter()
        .any(|c| c.table() == UNITS));
}

#[tokio::test]
async fn test_profile_found_by_email_is_linked() {
    let world = TestWorld::seeded();
    let mut roster_row = newcomer_user();
    roster_row.id = Some(scout_core::RowId::new(50));
    roster_row.email = "pietro.conti@example.com".to_string();
    roster_row.auth_id = None;
    world.store.seed_user(roster_row);

    let auth_id = Uuid::new_v4();
    world.auth.set_session(AuthUser {
        id: auth_id,
        email: "pietro.conti@example.com".to_string(),
        metadata: ProfileMetadata::default(),
    });
    let console = world.controller();

    assert_eq!(console.start().await, ConsoleState::Ready);
    assert!(!console.profile().expect("profile").incomplete);
    let stored = world
        .store
        .user(scout_core::RowId::new(50))
        .expect("roster row");
    assert_eq!(stored.auth_id, Some(auth_id));
}

// ============================================================================
// Unit selection
// ============================================================================

#[tokio::test]
async fn test_tampered_selection_fails_without_request() {
    let world = TestWorld::seeded();
    world.sign_in_as(&leader_user());
    let console = world.controller();
    console.start().await;
    world.store.clear_calls();

    let selection = console.select_unit(Some(ORSI)).await;

    match selection {
        UnitSelection::UnitLoadFailed { unit_id, .. } => assert_eq!(unit_id, Some(ORSI)),
        other => panic!("expected a failed load, got {other:?}"),
    }
    assert!(world.store.calls_reaching(ORSI).is_empty());

    // The raw picker value takes the same path
    let selection = console.select_unit_value("99").await;
    assert!(selection.is_failed());
    assert!(world.store.calls_reaching(ORSI).is_empty());
}

#[tokio::test]
async fn test_picker_values() {
    let world = TestWorld::seeded();
    world.sign_in_as(&leader_user());
    let console = world.controller();
    console.start().await;
    world.store.clear_calls();

    let selection = console.select_unit_value("12abc").await;
    assert!(matches!(
        selection,
        UnitSelection::UnitLoadFailed { unit_id: None, .. }
    ));
    assert!(world.store.calls().is_empty());

    assert_eq!(
        console.select_unit_value("").await,
        UnitSelection::NoUnitSelected
    );

    let selection = console.select_unit_value(" 12 ").await;
    assert_eq!(selected_unit(&selection), Some(AQUILE));
}

#[tokio::test]
async fn test_latest_selection_wins() {
    let world = TestWorld::seeded();
    world.sign_in_as(&helper_user());
    let console = world.controller();
    console.start().await;

    world.store.hold_unit(AQUILE);
    let slow = {
        let console = Arc::clone(&console);
        tokio::spawn(async move { console.select_unit(Some(AQUILE)).await })
    };

    let loading = wait_until(|| {
        matches!(
            console.selection(),
            UnitSelection::LoadingUnit { unit_id, .. } if unit_id == AQUILE
        )
    })
    .await;
    assert!(loading);

    let fast = console.select_unit(Some(LUPI)).await;
    assert_eq!(selected_unit(&fast), Some(LUPI));

    world.store.release_unit(AQUILE);
    let late = within(slow).await.expect("slow load finished").expect("task joined");

    // The superseded load reports the current selection and changes nothing
    assert_eq!(selected_unit(&late), Some(LUPI));
    assert_eq!(selected_unit(&console.selection()), Some(LUPI));
}

#[tokio::test]
async fn test_failed_panel_load_is_reported() {
    let world = TestWorld::seeded();
    world.sign_in_as(&leader_user());
    let console = world.controller();
    console.start().await;

    world.store.fail_table(MEMBERS);
    let selection = console.reload_unit().await;
    match selection {
        UnitSelection::UnitLoadFailed { unit_id, error } => {
            assert_eq!(unit_id, Some(AQUILE));
            assert!(error.contains("membri"));
        }
        other => panic!("expected a failed load, got {other:?}"),
    }
}

// ============================================================================
// Calendar
// ============================================================================

#[tokio::test]
async fn test_month_navigation() {
    let world = TestWorld::seeded();
    world.sign_in_as(&leader_user());
    let console = world.controller();
    console.start().await;

    let april = console
        .change_month(1)
        .await
        .expect("month loaded")
        .expect("unit selected");
    assert_eq!(april.label, "April 2025");
    let titles: Vec<&str> = april
        .month_cells()
        .flat_map(|c| c.activities.iter().map(|a| a.title.as_str()))
        .collect();
    assert_eq!(titles, ["Campo di primavera"]);

    let february = console
        .change_month(-2)
        .await
        .expect("month loaded")
        .expect("unit selected");
    assert_eq!(february.label, "February 2025");
    assert!(february.month_cells().all(|c| c.activities.is_empty()));

    let panel_label = console
        .selection()
        .panel()
        .map(|p| p.calendar.label.clone());
    assert_eq!(panel_label.as_deref(), Some("February 2025"));
}

#[tokio::test]
async fn test_month_navigation_without_unit() {
    let world = TestWorld::seeded();
    world.sign_in_as(&leader_user());
    let console = world.controller();
    console.start().await;
    console.select_unit(None).await;

    assert!(console.change_month(1).await.expect("no error").is_none());
    assert_eq!(console.month().label(), "April 2025");
}

#[tokio::test]
async fn test_month_change_during_unit_load_reaches_panel() {
    let world = TestWorld::seeded();
    world.sign_in_as(&leader_user());
    let console = world.controller();
    console.start().await;

    world.store.hold_unit(AQUILE);
    let reload = {
        let console = Arc::clone(&console);
        tokio::spawn(async move { console.reload_unit().await })
    };
    assert!(wait_until(|| console.selection().is_loading()).await);

    // Nothing to redraw yet; the month is only recorded
    assert!(console.change_month(1).await.expect("no error").is_none());
    assert_eq!(console.month().label(), "April 2025");

    world.store.release_unit(AQUILE);
    let selection = within(reload).await.expect("reload finished").expect("task joined");

    let panel = selection.panel().expect("unit panel loaded");
    assert_eq!(panel.calendar.label, "April 2025");
    assert_eq!(panel.calendar.month, console.month());
    let titles: Vec<&str> = panel
        .calendar
        .month_cells()
        .flat_map(|c| c.activities.iter().map(|a| a.title.as_str()))
        .collect();
    assert_eq!(titles, ["Campo di primavera"]);
    assert_eq!(console.selection(), selection);
}

// ============================================================================
// Sign-out
// ============================================================================

#[tokio::test]
async fn test_remote_sign_out_resets_console() {
    let world = TestWorld::seeded();
    world.sign_in_as(&leader_user());
    let console = world.controller();
    console.start().await;
    let listener = console.spawn_auth_listener();

    world.auth.revoke_session();

    let logged_out = wait_until(|| {
        console.state()
            == ConsoleState::LoggedOut(LoggedOutReason::SignedOut {
                event: "SIGNED_OUT",
            })
    })
    .await;
    assert!(logged_out);
    assert_eq!(console.selection(), UnitSelection::NoUnitSelected);
    assert!(console.profile().is_none());
    assert!(console.units().is_empty());

    listener.abort();
}

#[tokio::test]
async fn test_sign_out_from_console() {
    let world = TestWorld::seeded();
    world.sign_in_as(&helper_user());
    let console = world.controller();
    console.start().await;

    let state = console.sign_out().await.expect("sign-out succeeds");
    let ConsoleState::LoggedOut(reason) = state else {
        panic!("expected logged-out state, got {state:?}");
    };
    assert_eq!(reason.code(), "signed_out");
    assert!(reason.notice().text.ends_with("(Event: SIGNED_OUT)"));
    assert!(world.auth.session().is_none());
}

#[tokio::test]
async fn test_sign_out_during_startup_wins() {
    let world = TestWorld::seeded();
    world.sign_in_as(&leader_user());
    let console = world.controller();
    let listener = console.spawn_auth_listener();

    world.store.hold_profile_lookups();
    let startup = {
        let console = Arc::clone(&console);
        tokio::spawn(async move { console.start().await })
    };
    let looking_up = wait_until(|| {
        world
            .store
            .calls()
            .iter()
            .any(|c| matches!(c, StoreCall::Lookup { .. }))
    })
    .await;
    assert!(looking_up);

    world.auth.revoke_session();
    let signed_out = ConsoleState::LoggedOut(LoggedOutReason::SignedOut {
        event: "SIGNED_OUT",
    });
    assert!(wait_until(|| console.state() == signed_out).await);

    world.store.release_profile_lookups();
    let state = within(startup).await.expect("startup finished").expect("task joined");

    assert_eq!(state, signed_out);
    assert_eq!(console.state(), signed_out);
    assert!(console.profile().is_none());
    assert!(console.units().is_empty());
    assert_eq!(console.selection(), UnitSelection::NoUnitSelected);
    assert!(!world.store.calls().iter().any(|c| c.table() == UNITS));

    listener.abort();
}
