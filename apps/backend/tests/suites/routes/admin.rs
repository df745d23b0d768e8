use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use gazbot_backend::AppState;
use serde_json::{json, Value};

use crate::support::{
    as_user, build_test_state, open_event, security, security_with_admins, seed_event, send,
};

const ADMIN: i64 = 500;

async fn register_with_name(state: &AppState, event_id: i64, telegram_id: i64, first_name: &str) -> i64 {
    let req = as_user(
        test::TestRequest::post().uri(&format!("/api/events/{event_id}/register")),
        telegram_id,
    )
    .set_json(json!({"user_data": {"first_name": first_name}}));
    let resp = send(state, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let body: Value = test::read_body_json(resp).await;
    body["id"].as_i64().unwrap()
}

fn names(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|r| r["user"]["first_name"].as_str().unwrap().to_string())
        .collect()
}

#[actix_web::test]
async fn non_admin_is_forbidden() {
    let state = build_test_state(security_with_admins(&[ADMIN])).await;
    let event = seed_event(&state, open_event("Party")).await;

    let req = as_user(
        test::TestRequest::get().uri(&format!("/api/admin/events/{}/registrations", event.id)),
        501,
    );
    assert_problem_details_from_service_response(
        send(&state, req).await,
        "FORBIDDEN",
        StatusCode::FORBIDDEN,
        Some("Admin access required"),
    )
    .await;
}

#[actix_web::test]
async fn empty_allowlist_forbids_everyone() {
    let state = build_test_state(security()).await;

    let req = as_user(
        test::TestRequest::post().uri("/api/admin/registrations/bulk_update_statuses"),
        ADMIN,
    )
    .set_json(json!({"registration_ids": [1], "status": "accepted"}));
    assert_eq!(send(&state, req).await.status().as_u16(), 403);
}

#[actix_web::test]
async fn lists_registrations_with_users() {
    let state = build_test_state(security_with_admins(&[ADMIN])).await;
    let event = seed_event(&state, open_event("Party")).await;

    register_with_name(&state, event.id, 601, "Boris").await;
    register_with_name(&state, event.id, 602, "Anna").await;
    register_with_name(&state, event.id, 603, "Vera").await;

    let uri = format!("/api/admin/events/{}/registrations", event.id);
    let resp = send(&state, as_user(test::TestRequest::get().uri(&uri), ADMIN)).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;

    // default order is registration time, oldest first
    assert_eq!(names(&body), vec!["Boris", "Anna", "Vera"]);
    assert_eq!(body[0]["event_id"], event.id);
    assert_eq!(body[0]["status"], "pending");
    assert_eq!(body[0]["user"]["telegram_id"], 601);
    assert!(body[0]["check_in_token"].is_string());

    let uri = format!(
        "/api/admin/events/{}/registrations?sort_by=name&sort_order=desc",
        event.id
    );
    let body: Value =
        test::read_body_json(send(&state, as_user(test::TestRequest::get().uri(&uri), ADMIN)).await)
            .await;
    assert_eq!(names(&body), vec!["Vera", "Boris", "Anna"]);

    let uri = format!(
        "/api/admin/events/{}/registrations?sort_by=name&skip=1&limit=1",
        event.id
    );
    let body: Value =
        test::read_body_json(send(&state, as_user(test::TestRequest::get().uri(&uri), ADMIN)).await)
            .await;
    assert_eq!(names(&body), vec!["Boris"]);
}

#[actix_web::test]
async fn status_filter_and_bulk_update() {
    let state = build_test_state(security_with_admins(&[ADMIN])).await;
    let event = seed_event(&state, open_event("Party")).await;

    let first = register_with_name(&state, event.id, 611, "Anna").await;
    let second = register_with_name(&state, event.id, 612, "Boris").await;
    register_with_name(&state, event.id, 613, "Vera").await;

    let req = as_user(
        test::TestRequest::post().uri("/api/admin/registrations/bulk_update_statuses"),
        ADMIN,
    )
    .set_json(json!({"registration_ids": [first, second], "status": "accepted"}));
    let resp = send(&state, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Successfully updated 2 registration(s)");

    let uri = format!(
        "/api/admin/events/{}/registrations?status=accepted",
        event.id
    );
    let body: Value =
        test::read_body_json(send(&state, as_user(test::TestRequest::get().uri(&uri), ADMIN)).await)
            .await;
    assert_eq!(names(&body), vec!["Anna", "Boris"]);

    let uri = format!("/api/admin/events/{}/registrations?status=pending", event.id);
    let body: Value =
        test::read_body_json(send(&state, as_user(test::TestRequest::get().uri(&uri), ADMIN)).await)
            .await;
    assert_eq!(names(&body), vec!["Vera"]);
}

#[actix_web::test]
async fn bulk_update_with_unknown_ids_is_404() {
    let state = build_test_state(security_with_admins(&[ADMIN])).await;

    let req = as_user(
        test::TestRequest::post().uri("/api/admin/registrations/bulk_update_statuses"),
        ADMIN,
    )
    .set_json(json!({"registration_ids": [404, 405], "status": "declined"}));
    assert_problem_details_from_service_response(
        send(&state, req).await,
        "REGISTRATION_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("No registrations found with provided IDs"),
    )
    .await;
}

#[actix_web::test]
async fn bulk_update_requires_ids_and_known_status() {
    let state = build_test_state(security_with_admins(&[ADMIN])).await;

    let req = as_user(
        test::TestRequest::post().uri("/api/admin/registrations/bulk_update_statuses"),
        ADMIN,
    )
    .set_json(json!({"registration_ids": [], "status": "accepted"}));
    assert_problem_details_from_service_response(
        send(&state, req).await,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
        Some("registration_ids"),
    )
    .await;

    let req = as_user(
        test::TestRequest::post().uri("/api/admin/registrations/bulk_update_statuses"),
        ADMIN,
    )
    .set_json(json!({"registration_ids": [1], "status": "maybe"}));
    assert_problem_details_from_service_response(
        send(&state, req).await,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
}

#[actix_web::test]
async fn unknown_event_and_bad_query_are_rejected() {
    let state = build_test_state(security_with_admins(&[ADMIN])).await;

    let req = as_user(
        test::TestRequest::get().uri("/api/admin/events/777/registrations"),
        ADMIN,
    );
    assert_problem_details_from_service_response(
        send(&state, req).await,
        "EVENT_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("Event not found"),
    )
    .await;

    let event = seed_event(&state, open_event("Party")).await;
    let uri = format!("/api/admin/events/{}/registrations?limit=1001", event.id);
    assert_problem_details_from_service_response(
        send(&state, as_user(test::TestRequest::get().uri(&uri), ADMIN)).await,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
        Some("limit"),
    )
    .await;

    let uri = format!("/api/admin/events/{}/registrations?sort_by=email", event.id);
    assert_problem_details_from_service_response(
        send(&state, as_user(test::TestRequest::get().uri(&uri), ADMIN)).await,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
}
