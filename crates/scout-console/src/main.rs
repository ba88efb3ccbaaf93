//! Scout console entry point
//!
//! Run with:
//! ```bash
//! SCOUT_EMAIL=capo@example.com SCOUT_PASSWORD=... cargo run -p scout-console
//! ```
//!
//! Configuration is loaded from environment variables. Without credentials
//! the console resumes from `SCOUT_ACCESS_TOKEN` / `SCOUT_REFRESH_TOKEN`.
//! `SCOUT_UNIT` picks a unit instead of the first visible one.

use std::env;
use std::sync::Arc;

use anyhow::Context;
use scout_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use scout_core::AuthProvider;
use scout_service::dto::LoginRequest;
use scout_service::services::AuthService;
use scout_service::{ConsoleController, ConsoleState, ServiceContext, UnitSelection};
use scout_store::{
    RestActivityRepository, RestAuthProvider, RestClient, RestMemberRepository,
    RestSettingRepository, RestUnitRepository, RestUserRepository, StoreConfig,
};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "Console failed");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        app = %config.app.name,
        env = ?config.app.env,
        backend = %config.backend.url,
        "Configuration loaded"
    );

    let client = RestClient::new(StoreConfig::from(&config.backend))?;
    let auth = Arc::new(RestAuthProvider::new(&client));

    let ctx = ServiceContext::builder()
        .user_repo(Arc::new(RestUserRepository::new(client.clone())))
        .unit_repo(Arc::new(RestUnitRepository::new(client.clone())))
        .activity_repo(Arc::new(RestActivityRepository::new(client.clone())))
        .member_repo(Arc::new(RestMemberRepository::new(client.clone())))
        .setting_repo(Arc::new(RestSettingRepository::new(client)))
        .auth(Arc::clone(&auth) as Arc<dyn AuthProvider>)
        .registration_base_url(config.registration.base_url.clone())
        .build()?;

    authenticate(&ctx, &auth).await?;

    let controller = Arc::new(ConsoleController::new(ctx));
    let listener = controller.spawn_auth_listener();

    match controller.start().await {
        ConsoleState::Ready => {}
        ConsoleState::LoggedOut(reason) => {
            anyhow::bail!("{}", reason.notice().text);
        }
        ConsoleState::Starting => anyhow::bail!("Console did not start"),
    }

    report_profile(&controller);

    if let Ok(raw) = env::var("SCOUT_UNIT") {
        controller.select_unit_value(&raw).await;
    }
    report_selection(&controller.selection());

    listener.abort();
    Ok(())
}

/// Sign in with credentials, or resume saved tokens
async fn authenticate(ctx: &ServiceContext, auth: &RestAuthProvider) -> anyhow::Result<()> {
    if let (Ok(email), Ok(password)) = (env::var("SCOUT_EMAIL"), env::var("SCOUT_PASSWORD")) {
        AuthService::new(ctx)
            .sign_in(LoginRequest { email, password })
            .await
            .context("Sign-in failed")?;
        return Ok(());
    }

    if let Ok(access_token) = env::var("SCOUT_ACCESS_TOKEN") {
        let refresh_token = env::var("SCOUT_REFRESH_TOKEN").ok();
        auth.restore_session(&access_token, refresh_token.as_deref())
            .await
            .context("Could not resume the saved session")?;
        return Ok(());
    }

    warn!("No credentials given, continuing signed out");
    Ok(())
}

fn report_profile(controller: &ConsoleController) {
    if let Some(profile) = controller.profile() {
        let caps = controller.capabilities();
        info!(
            user = %profile.user.display_name(),
            roles = %profile.user.roles,
            incomplete = profile.incomplete,
            unit_admin = caps.unit_admin_tab,
            site_admin = caps.site_admin_tab,
            "Signed in"
        );
    }

    for unit in controller.units() {
        println!("[{}] {}", unit.id, unit.name);
    }
}

fn report_selection(selection: &UnitSelection) {
    match selection {
        UnitSelection::NoUnitSelected => println!("No unit selected"),
        UnitSelection::LoadingUnit { unit_id, .. } => println!("Unit {unit_id} still loading"),
        UnitSelection::UnitLoadFailed { unit_id, error } => match unit_id {
            Some(id) => println!("Unit {id} failed to load: {error}"),
            None => println!("Unit selection rejected: {error}"),
        },
        UnitSelection::UnitSelected(panel) => {
            println!(
                "{} ({} members, {} settings)",
                panel.unit.name,
                panel.members.len(),
                panel.settings.len()
            );
            println!("{}", panel.calendar.label);
            for cell in panel.calendar.month_cells() {
                for activity in &cell.activities {
                    println!("  {} {}", cell.date, activity.title);
                }
            }
            for activity in &panel.activities {
                println!("- {} {}", activity.date, activity.title);
            }
        }
    }
}
