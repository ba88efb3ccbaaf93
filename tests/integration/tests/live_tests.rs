//! Smoke tests against a live backend
//!
//! These tests require:
//! - A reachable backend project
//! - Environment variables: SCOUT_BACKEND_URL, SCOUT_ANON_KEY
//! - Optionally SCOUT_TEST_EMAIL / SCOUT_TEST_PASSWORD for a signed-in run
//!
//! Run with: cargo test -p integration-tests --test live_tests

use std::sync::Arc;

use integration_tests::{check_test_env, live_context};
use scout_core::AuthProvider;
use scout_service::services::RegistrationService;
use scout_service::{ConsoleController, ConsoleState, LoggedOutReason};

#[tokio::test]
async fn test_console_without_session_logs_out() {
    if !check_test_env() {
        return;
    }

    let (ctx, _auth) = live_context().expect("live context");
    let console = ConsoleController::new(ctx);

    assert_eq!(
        console.start().await,
        ConsoleState::LoggedOut(LoggedOutReason::NoSession)
    );
}

#[tokio::test]
async fn test_registration_units_are_public() {
    if !check_test_env() {
        return;
    }

    let (ctx, _auth) = live_context().expect("live context");
    let units = RegistrationService::new(&ctx).registration_units().await;
    assert!(units.is_ok(), "unit list failed: {units:?}");
}

#[tokio::test]
async fn test_signed_in_console_starts() {
    if !check_test_env() {
        return;
    }
    let (Ok(email), Ok(password)) = (
        std::env::var("SCOUT_TEST_EMAIL"),
        std::env::var("SCOUT_TEST_PASSWORD"),
    ) else {
        eprintln!("Skipping test: SCOUT_TEST_EMAIL / SCOUT_TEST_PASSWORD not set");
        return;
    };

    let (ctx, auth) = live_context().expect("live context");
    auth.sign_in(&email, &password).await.expect("sign-in");

    let console = Arc::new(ConsoleController::new(ctx));
    assert_eq!(console.start().await, ConsoleState::Ready);

    if let Some(unit) = console.units().first() {
        let selection = console.select_unit(Some(unit.id)).await;
        assert!(selection.panel().is_some(), "panel failed: {selection:?}");
    }

    auth.sign_out().await.expect("sign-out");
}
