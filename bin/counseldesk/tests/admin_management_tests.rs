mod common;

use axum_test::TestServer;
use common::fixtures::{assign_admin, bearer_token, insert_office, insert_user};
use common::{create_test_app, create_test_app_state};
use counseldesk_core::realtime::Room;
use counseldesk_primitives::models::entities::{Role, SuperAdminActivityLog, User};
use counseldesk_primitives::schema::{office_admins, super_admin_activity_logs, users};
use diesel::prelude::*;
use serde_json::json;
use serial_test::serial;

fn recv_event(
    rx: &mut tokio::sync::broadcast::Receiver<String>,
) -> Option<serde_json::Value> {
    rx.try_recv().ok().map(|raw| serde_json::from_str(&raw).unwrap())
}

#[tokio::test]
#[serial]
#[ignore = "requires a live postgres database"]
async fn add_admin_creates_inactive_account_and_logs() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state.clone())).unwrap();

    let mut conn = state.db.get().unwrap();
    let root = insert_user(&mut conn, Role::SuperAdmin, "root@example.com");
    let office_id = insert_office(&mut conn, "Guidance Office");
    let token = bearer_token(&state.config, &root);

    let response = server
        .post("/api/admins")
        .authorization_bearer(&token)
        .json(&json!({
            "first_name": "Maria",
            "last_name": "Santos",
            "email": "maria@example.com",
            "password": "password123",
            "confirm_password": "password123",
            "office_id": office_id,
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);

    let admin: User = users::table
        .filter(users::email.eq("maria@example.com"))
        .first(&mut conn)
        .unwrap();
    assert_eq!(admin.role, "office_admin");
    assert!(!admin.is_active);

    let assigned: i64 = office_admins::table
        .filter(office_admins::user_id.eq(admin.id))
        .filter(office_admins::office_id.eq(office_id))
        .count()
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(assigned, 1);

    let log: SuperAdminActivityLog = super_admin_activity_logs::table
        .filter(super_admin_activity_logs::action.eq("Create Office Admin"))
        .first(&mut conn)
        .unwrap();
    assert_eq!(log.super_admin_id, Some(root.id));
    assert_eq!(log.target_user_id, Some(admin.id));
    assert!(log.is_success);
}

#[tokio::test]
#[serial]
#[ignore = "requires a live postgres database"]
async fn committed_mutation_reaches_room_subscribers() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state.clone())).unwrap();

    let mut conn = state.db.get().unwrap();
    let root = insert_user(&mut conn, Role::SuperAdmin, "root@example.com");
    let office_id = insert_office(&mut conn, "Registrar");
    let token = bearer_token(&state.config, &root);

    let mut rx = state.broadcaster.subscribe(Room::SuperAdmin);

    server
        .post("/api/admins")
        .authorization_bearer(&token)
        .json(&json!({
            "first_name": "Leo",
            "last_name": "Cruz",
            "email": "leo@example.com",
            "password": "password123",
            "confirm_password": "password123",
            "office_id": office_id,
        }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let added = recv_event(&mut rx).expect("admin_added event");
    assert_eq!(added["event"], "admin_added");
    assert_eq!(added["data"]["name"], "Leo Cruz");
    assert_eq!(added["data"]["created_by"], "Test User");

    let assignment = recv_event(&mut rx).expect("assignment event");
    assert_eq!(assignment["event"], "admin_office_assignment");
    assert_eq!(assignment["data"]["action"], "assign");
    assert_eq!(assignment["data"]["office_name"], "Registrar");

    let stats = recv_event(&mut rx).expect("stats event");
    assert_eq!(stats["event"], "dashboard_stats_update");
    assert!(stats["data"]["active_users"].is_number());
}

#[tokio::test]
#[serial]
#[ignore = "requires a live postgres database"]
async fn failed_mutation_rolls_back_and_publishes_nothing() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state.clone())).unwrap();

    let mut conn = state.db.get().unwrap();
    let root = insert_user(&mut conn, Role::SuperAdmin, "root@example.com");
    insert_user(&mut conn, Role::OfficeAdmin, "taken@example.com");
    let token = bearer_token(&state.config, &root);

    let mut rx = state.broadcaster.subscribe(Room::SuperAdmin);
    let before: i64 = users::table.count().get_result(&mut conn).unwrap();

    server
        .post("/api/admins")
        .authorization_bearer(&token)
        .json(&json!({
            "first_name": "Dup",
            "last_name": "Licate",
            "email": "taken@example.com",
            "password": "password123",
            "confirm_password": "password123",
        }))
        .await
        .assert_status(axum::http::StatusCode::BAD_REQUEST);

    let after: i64 = users::table.count().get_result(&mut conn).unwrap();
    assert_eq!(before, after);

    let logs: i64 = super_admin_activity_logs::table
        .count()
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(logs, 0);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
#[serial]
#[ignore = "requires a live postgres database"]
async fn update_admin_emits_one_event_per_changed_field() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state.clone())).unwrap();

    let mut conn = state.db.get().unwrap();
    let root = insert_user(&mut conn, Role::SuperAdmin, "root@example.com");
    let admin = insert_user(&mut conn, Role::OfficeAdmin, "admin@example.com");
    let token = bearer_token(&state.config, &root);

    let mut rx = state.broadcaster.subscribe(Room::SuperAdmin);

    server
        .put(&format!("/api/admins/{}", admin.id))
        .authorization_bearer(&token)
        .json(&json!({
            "first_name": "Renamed",
            "last_name": "User",
            "email": "admin@example.com",
            "is_active": false,
        }))
        .await
        .assert_status_ok();

    let first = recv_event(&mut rx).expect("first_name event");
    assert_eq!(first["event"], "admin_updated");
    assert_eq!(first["data"]["field_updated"], "first_name");
    assert_eq!(first["data"]["new_value"], "Renamed");

    let second = recv_event(&mut rx).expect("is_active event");
    assert_eq!(second["data"]["field_updated"], "is_active");
    assert_eq!(second["data"]["new_value"], "inactive");

    let log: SuperAdminActivityLog = super_admin_activity_logs::table
        .filter(super_admin_activity_logs::action.eq("Update Office Admin"))
        .first(&mut conn)
        .unwrap();
    let details = log.details.unwrap();
    assert!(details.contains("first_name: Test -> Renamed"));
    assert!(details.contains("is_active: true -> false"));
}

#[tokio::test]
#[serial]
#[ignore = "requires a live postgres database"]
async fn delete_admin_keeps_trail_with_nulled_target() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state.clone())).unwrap();

    let mut conn = state.db.get().unwrap();
    let root = insert_user(&mut conn, Role::SuperAdmin, "root@example.com");
    let admin = insert_user(&mut conn, Role::OfficeAdmin, "doomed@example.com");
    let office_id = insert_office(&mut conn, "Clinic");
    assign_admin(&mut conn, admin.id, office_id);
    let token = bearer_token(&state.config, &root);

    server
        .delete(&format!("/api/admins/{}", admin.id))
        .authorization_bearer(&token)
        .await
        .assert_status_ok();

    let remaining: i64 = users::table
        .filter(users::id.eq(admin.id))
        .count()
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(remaining, 0);

    // the assignment cascades away with the account
    let assignments: i64 = office_admins::table
        .filter(office_admins::user_id.eq(admin.id))
        .count()
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(assignments, 0);

    // the trail entry survives, pointing at nobody
    let log: SuperAdminActivityLog = super_admin_activity_logs::table
        .filter(super_admin_activity_logs::action.eq("Delete Office Admin"))
        .first(&mut conn)
        .unwrap();
    assert_eq!(log.target_user_id, None);
    assert!(log.details.unwrap().contains("doomed@example.com"));
}

#[tokio::test]
#[serial]
#[ignore = "requires a live postgres database"]
async fn reset_password_returns_usable_one_time_password() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state.clone())).unwrap();

    let mut conn = state.db.get().unwrap();
    let root = insert_user(&mut conn, Role::SuperAdmin, "root@example.com");
    let admin = insert_user(&mut conn, Role::OfficeAdmin, "admin@example.com");
    let token = bearer_token(&state.config, &root);

    let response = server
        .post(&format!("/api/admins/{}/reset_password", admin.id))
        .authorization_bearer(&token)
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let password = body["password"].as_str().unwrap();
    assert_eq!(password.len(), 4);
    assert!(password.chars().all(|c| c.is_ascii_digit()));

    let stored: String = users::table
        .find(admin.id)
        .select(users::password_hash)
        .first(&mut conn)
        .unwrap();
    assert!(bcrypt::verify(password, &stored).unwrap());
}

#[tokio::test]
#[serial]
#[ignore = "requires a live postgres database"]
async fn remove_office_admin_requires_membership() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state.clone())).unwrap();

    let mut conn = state.db.get().unwrap();
    let root = insert_user(&mut conn, Role::SuperAdmin, "root@example.com");
    let admin = insert_user(&mut conn, Role::OfficeAdmin, "admin@example.com");
    let office_id = insert_office(&mut conn, "Accounts");
    let other_office = insert_office(&mut conn, "Library");
    assign_admin(&mut conn, admin.id, office_id);
    let token = bearer_token(&state.config, &root);

    // not assigned there
    server
        .delete(&format!("/api/offices/{}/admins/{}", other_office, admin.id))
        .authorization_bearer(&token)
        .await
        .assert_status(axum::http::StatusCode::NOT_FOUND);

    server
        .delete(&format!("/api/offices/{}/admins/{}", office_id, admin.id))
        .authorization_bearer(&token)
        .await
        .assert_status_ok();

    let assignments: i64 = office_admins::table
        .filter(office_admins::user_id.eq(admin.id))
        .count()
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(assignments, 0);
}

#[tokio::test]
#[serial]
#[ignore = "requires a live postgres database"]
async fn management_endpoints_reject_non_super_admins() {
    let state = create_test_app_state();
    let server = TestServer::new(create_test_app(state.clone())).unwrap();

    let mut conn = state.db.get().unwrap();
    let office_admin = insert_user(&mut conn, Role::OfficeAdmin, "office@example.com");
    let token = bearer_token(&state.config, &office_admin);

    server
        .post("/api/admins")
        .authorization_bearer(&token)
        .json(&json!({
            "first_name": "X",
            "last_name": "Y",
            "email": "x@example.com",
            "password": "password123",
            "confirm_password": "password123",
        }))
        .await
        .assert_status(axum::http::StatusCode::FORBIDDEN);

    server
        .get("/api/logs")
        .authorization_bearer(&token)
        .await
        .assert_status(axum::http::StatusCode::FORBIDDEN);

    // office admins may still list offices
    server
        .get("/api/offices")
        .authorization_bearer(&token)
        .await
        .assert_status_ok();
}
