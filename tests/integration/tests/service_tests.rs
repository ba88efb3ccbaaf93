//! Service scenarios against the in-memory backend
//!
//! Run with: cargo test -p integration-tests --test service_tests

use integration_tests::*;
use scout_common::AppError;
use scout_core::{
    AccessScope, AccessScopeResolver, AuthError, DomainError, RowId, SignUpOutcome, User,
    UserRoles,
};
use scout_service::dto::{
    ActivityRequest, LoginRequest, MemberRequest, NoticeKind, ObjectiveRequest,
    ScheduleSlotRequest, SettingRequest, SignUpRequest, UnitRequest, UpdateAccessRequest,
};
use scout_service::services::{
    login_notice, ActivityService, AuthService, MemberService, RegistrationService,
    SettingService, UnitService, UserAdminService,
};
use scout_service::ServiceError;

fn scope_of(user: &User) -> AccessScope {
    AccessScopeResolver::resolve(user)
}

fn activity_request(unit_id: scout_core::UnitId, title: &str) -> ActivityRequest {
    ActivityRequest {
        unit_id,
        title: title.to_string(),
        objectives: Some("Imparare a montare la tenda".to_string()),
        date: date(2025, 3, 29),
        achieved: None,
        schedule: vec![
            ScheduleSlotRequest {
                time: "15:00".to_string(),
                label: "Gioco".to_string(),
                ..ScheduleSlotRequest::default()
            },
            ScheduleSlotRequest::default(),
        ],
    }
}

// ============================================================================
// Site administration
// ============================================================================

#[tokio::test]
async fn test_admin_unit_cards_carry_leader_names() {
    let world = TestWorld::seeded();
    let cards = UnitService::new(&world.ctx)
        .list_with_leaders(&admin_user())
        .await
        .expect("admin lists units");

    let aquile = cards.iter().find(|c| c.id == AQUILE).expect("Aquile card");
    assert_eq!(aquile.leader_name.as_deref(), Some("Giulia Neri"));
    assert_eq!(aquile.helper_count, 1);

    let lupi = cards.iter().find(|c| c.id == LUPI).expect("Lupi card");
    assert_eq!(lupi.leader_name, None);
}

#[tokio::test]
async fn test_site_administration_requires_admin() {
    let world = TestWorld::seeded();
    let leader = leader_user();

    let err = UnitService::new(&world.ctx)
        .list_with_leaders(&leader)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::AdminRequired)));

    let err = UserAdminService::new(&world.ctx)
        .list_users(&leader, &scope_of(&leader))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::AdminRequired)));

    let err = UnitService::new(&world.ctx)
        .delete_unit(&leader, ORSI)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::AdminRequired)));
    assert!(world.store.unit(ORSI).is_some());
}

#[tokio::test]
async fn test_unit_lifecycle() {
    let world = TestWorld::seeded();
    let admin = admin_user();
    let service = UnitService::new(&world.ctx);

    let unit = service
        .create_unit(
            &admin,
            UnitRequest {
                name: "  Noviziato Falchi ".to_string(),
                leader_id: Some(HELPER_ID),
                helper_ids: Vec::new(),
                member_count: None,
            },
        )
        .await
        .expect("unit created");
    assert_eq!(unit.name, "Noviziato Falchi");

    let renamed = service
        .update_unit(
            &admin,
            unit.id,
            UnitRequest {
                name: "Noviziato Sparvieri".to_string(),
                leader_id: Some(HELPER_ID),
                helper_ids: vec![LEADER_ID],
                member_count: Some(4),
            },
        )
        .await
        .expect("unit updated");
    assert_eq!(renamed.helper_ids, vec![LEADER_ID]);
    assert_eq!(world.store.unit(unit.id).map(|u| u.member_count), Some(4));

    service.delete_unit(&admin, unit.id).await.expect("unit deleted");
    assert!(world.store.unit(unit.id).is_none());
}

#[tokio::test]
async fn test_member_count_refresh() {
    let world = TestWorld::seeded();
    let leader = leader_user();

    let count = UnitService::new(&world.ctx)
        .refresh_member_count(&scope_of(&leader), AQUILE)
        .await
        .expect("count refreshed");
    assert_eq!(count, 2);
    assert_eq!(world.store.unit(AQUILE).map(|u| u.member_count), Some(2));
}

#[tokio::test]
async fn test_access_update_normalizes_units() {
    let world = TestWorld::seeded();
    let summary = UserAdminService::new(&world.ctx)
        .update_access(
            &admin_user(),
            NEWCOMER_ID,
            UpdateAccessRequest {
                helper: true,
                visible_unit_ids: vec![LUPI, LUPI, AQUILE],
                ..UpdateAccessRequest::default()
            },
        )
        .await
        .expect("access updated");

    assert!(summary.helper);
    let stored = world.store.user(NEWCOMER_ID).expect("user row");
    assert_eq!(stored.roles, UserRoles::HELPER);
    assert_eq!(stored.visible_unit_ids, vec![LUPI, AQUILE]);

    // Takes effect on the next resolution of that user's scope
    assert!(scope_of(&stored).contains(LUPI));
}

#[tokio::test]
async fn test_staff_without_units_is_rejected() {
    let world = TestWorld::seeded();
    let err = UserAdminService::new(&world.ctx)
        .update_access(
            &admin_user(),
            NEWCOMER_ID,
            UpdateAccessRequest {
                unit_leader: true,
                ..UpdateAccessRequest::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Validation(_)));
    assert!(!world
        .store
        .calls()
        .iter()
        .any(|c| matches!(c, StoreCall::Write { op: "update_access", .. })));
}

#[tokio::test]
async fn test_admin_roster_is_ordered_by_last_name() {
    let world = TestWorld::seeded();
    let admin = admin_user();
    let users = UserAdminService::new(&world.ctx)
        .list_users(&admin, &scope_of(&admin))
        .await
        .expect("roster listed");

    let names: Vec<&str> = users.iter().map(|u| u.display_name.as_str()).collect();
    assert_eq!(
        names,
        ["Marco Bianchi", "Giulia Neri", "Luca Rossi", "Anna Verdi"]
    );
}

// ============================================================================
// Activities
// ============================================================================

#[tokio::test]
async fn test_activity_crud_in_scope() {
    let world = TestWorld::seeded();
    let scope = scope_of(&leader_user());
    let service = ActivityService::new(&world.ctx);

    let created = service
        .create(&scope, activity_request(AQUILE, "Pioneristica"))
        .await
        .expect("activity created");
    assert_eq!(created.schedule.len(), 1);

    service
        .update(&scope, created.id, activity_request(AQUILE, "Pioneristica avanzata"))
        .await
        .expect("activity updated");
    let fetched = service.get(&scope, created.id).await.expect("activity read");
    assert_eq!(fetched.title, "Pioneristica avanzata");

    service.delete(&scope, created.id).await.expect("activity deleted");
    let err = service.get(&scope, created.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }));
}

#[tokio::test]
async fn test_activity_writes_outside_scope_are_refused() {
    let world = TestWorld::seeded();
    let scope = scope_of(&leader_user());
    let service = ActivityService::new(&world.ctx);
    let before = world.store.activity_count();

    let err = service
        .create(&scope, activity_request(ORSI, "Intrusione"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::OutOfScope(id) if id == ORSI));

    // Moving an own activity into a foreign unit
    let err = service
        .update(&scope, RowId::new(101), activity_request(ORSI, "Spostata"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::OutOfScope(_)));

    // Deleting a foreign activity by id
    let err = service.delete(&scope, RowId::new(105)).await.unwrap_err();
    assert!(matches!(err, ServiceError::OutOfScope(_)));

    assert_eq!(world.store.activity_count(), before);
}

#[tokio::test]
async fn test_activity_range_for_calendar() {
    let world = TestWorld::seeded();
    let activities = ActivityService::new(&world.ctx)
        .in_range(&AccessScope::Unrestricted, AQUILE, date(2025, 3, 1), date(2025, 3, 31))
        .await
        .expect("range listed");

    let titles: Vec<&str> = activities.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, ["Uscita al lago", "Riunione di reparto"]);
}

// ============================================================================
// Members
// ============================================================================

#[tokio::test]
async fn test_member_objectives() {
    let world = TestWorld::seeded();
    let scope = scope_of(&leader_user());
    let service = MemberService::new(&world.ctx);
    let paolo = RowId::new(201);

    let view = service
        .add_objective(
            &scope,
            paolo,
            ObjectiveRequest {
                title: "Primo soccorso".to_string(),
                date: Some(date(2025, 3, 10)),
            },
        )
        .await
        .expect("objective added");
    assert_eq!(view.objectives.len(), 3);

    let view = service
        .remove_objective(&scope, paolo, 0)
        .await
        .expect("objective removed");
    let titles: Vec<&str> = view.objectives.iter().map(|o| o.title.as_str()).collect();
    assert_eq!(titles, ["Orientamento", "Primo soccorso"]);
    assert_eq!(
        world.store.member(paolo).map(|m| m.objectives.len()),
        Some(2)
    );

    let err = service.remove_objective(&scope, paolo, 5).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::ObjectiveOutOfRange { index: 5, len: 2 })
    ));
}

#[tokio::test]
async fn test_member_create_and_count() {
    let world = TestWorld::seeded();
    let scope = scope_of(&helper_user());
    let service = MemberService::new(&world.ctx);

    service
        .create(
            &scope,
            MemberRequest {
                unit_id: LUPI,
                first_name: "Giorgio".to_string(),
                last_name: "Marino".to_string(),
                year: Some(2016),
                role: Some("Lupetto".to_string()),
                objectives: Vec::new(),
            },
        )
        .await
        .expect("member created");

    assert_eq!(service.count(&scope, LUPI).await.expect("counted"), 2);

    let err = service
        .create(
            &scope,
            MemberRequest {
                unit_id: LUPI,
                first_name: "Giorgio".to_string(),
                last_name: "Marino".to_string(),
                year: Some(1850),
                role: None,
                objectives: Vec::new(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

// ============================================================================
// Settings
// ============================================================================

#[tokio::test]
async fn test_settings_need_unit_staff() {
    let world = TestWorld::seeded();
    let mut scout = newcomer_user();
    scout.set_visible_units([AQUILE]);
    let service = SettingService::new(&world.ctx);

    let request = SettingRequest {
        unit_id: AQUILE,
        key: "sede".to_string(),
        value: "Via Roma 1".to_string(),
    };

    let err = service
        .create(&scout, &scope_of(&scout), request.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::UnitStaffRequired)));

    let leader = leader_user();
    let created = service
        .create(&leader, &scope_of(&leader), request)
        .await
        .expect("leader creates setting");
    service
        .update_value(&leader, &scope_of(&leader), created.id, "Via Milano 2")
        .await
        .expect("leader updates setting");

    let values: Vec<String> = service
        .list(&scope_of(&leader), AQUILE)
        .await
        .expect("settings listed")
        .into_iter()
        .map(|s| s.value)
        .collect();
    assert!(values.contains(&"Via Milano 2".to_string()));
}

// ============================================================================
// Registration and sign-in
// ============================================================================

#[tokio::test]
async fn test_registration_link_round_trip() {
    let world = TestWorld::seeded();
    let service = RegistrationService::new(&world.ctx);

    let url = service
        .registration_link(&admin_user(), Some(AQUILE))
        .expect("admin builds link");
    assert!(url.starts_with("https://scout.example.org/"));
    assert_eq!(service.preselected_unit(&url), Some(AQUILE));
    assert_eq!(
        service.preselected_unit("https://scout.example.org/register.html?register=%%%"),
        None
    );

    let err = service
        .registration_link(&leader_user(), None)
        .unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::AdminRequired)));

    let units = service.registration_units().await.expect("units listed");
    assert_eq!(units.len(), 3);
}

#[tokio::test]
async fn test_sign_up_then_confirm_notice() {
    let world = TestWorld::seeded();
    let service = AuthService::new(&world.ctx);
    let email = format!("nuovo{}@example.com", unique_suffix());

    let request = SignUpRequest {
        first_name: "Chiara".to_string(),
        last_name: "Fontana".to_string(),
        email: email.clone(),
        password: "campo2025".to_string(),
        password_confirmation: "campo2025".to_string(),
        unit_id: Some(LUPI),
    };

    let mismatch = SignUpRequest {
        password_confirmation: "campo2026".to_string(),
        ..request.clone()
    };
    assert!(matches!(
        service.sign_up(mismatch).await.unwrap_err(),
        ServiceError::Validation(_) | ServiceError::App(AppError::Validation(_))
    ));

    let no_unit = SignUpRequest {
        unit_id: None,
        ..request.clone()
    };
    assert!(service.sign_up(no_unit).await.is_err());

    let outcome = service.sign_up(request).await.expect("sign-up accepted");
    assert!(matches!(outcome, SignUpOutcome::ConfirmationRequired));

    let metadata = world.auth.metadata_for(&email).expect("account stored");
    assert_eq!(metadata.unit_id, Some(LUPI));
    assert_eq!(metadata.first_name.as_deref(), Some("Chiara"));

    let notice = login_notice(Some("confirm-email"), None, None).expect("notice");
    assert_eq!(notice.kind, NoticeKind::Info);
}

#[tokio::test]
async fn test_sign_in_with_wrong_password() {
    let world = TestWorld::seeded();
    let leader = leader_user();
    world.sign_in_as(&leader);
    let service = AuthService::new(&world.ctx);

    let err = service
        .sign_in(LoginRequest {
            email: leader.email.clone(),
            password: "sbagliata".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::App(AppError::Auth(AuthError::InvalidCredentials))
    ));

    let session = service
        .sign_in(LoginRequest {
            email: leader.email.clone(),
            password: PASSWORD.to_string(),
        })
        .await
        .expect("sign-in succeeds");
    assert_eq!(Some(session.user.id), leader.auth_id);
}
