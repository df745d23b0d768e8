use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use gazbot_backend::repos::events::EventCreate;
use serde_json::{json, Value};
use time::{Duration, OffsetDateTime};

use crate::support::{as_user, build_test_state, open_event, security, seed_event, send};

fn register(event_id: i64, telegram_id: i64, user_data: Value) -> test::TestRequest {
    as_user(
        test::TestRequest::post().uri(&format!("/api/events/{event_id}/register")),
        telegram_id,
    )
    .set_json(json!({ "user_data": user_data }))
}

#[actix_web::test]
async fn current_event_is_latest_active() {
    let state = build_test_state(security()).await;
    let now = OffsetDateTime::now_utc();

    seed_event(&state, open_event("Earlier")).await;
    seed_event(&state, EventCreate::new("Latest", now + Duration::days(60))).await;
    seed_event(
        &state,
        EventCreate::new("Inactive", now + Duration::days(90)).inactive(),
    )
    .await;

    let req = as_user(test::TestRequest::get().uri("/api/events/current"), 1);
    let resp = send(&state, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["title"], "Latest");
    assert_eq!(body["is_active"], true);
    assert_eq!(body["deadline"], Value::Null);
}

#[actix_web::test]
async fn current_event_missing_is_404() {
    let state = build_test_state(security()).await;

    let req = as_user(test::TestRequest::get().uri("/api/events/current"), 1);
    assert_problem_details_from_service_response(
        send(&state, req).await,
        "EVENT_NOT_FOUND",
        StatusCode::NOT_FOUND,
        None,
    )
    .await;
}

#[actix_web::test]
async fn register_creates_pending_registration_and_updates_profile() {
    let state = build_test_state(security()).await;
    let event = seed_event(&state, open_event("Party")).await;

    let resp = send(
        &state,
        register(event.id, 20, json!({"first_name": "Ann", "isu": 334455})),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["event_id"], event.id);
    assert_eq!(body["status"], "pending");
    assert_eq!(body["checked_in_at"], Value::Null);
    let token = body["check_in_token"].as_str().unwrap();
    assert_eq!(token.len(), 43);

    let req = as_user(test::TestRequest::get().uri("/api/users/me"), 20);
    let me: Value = test::read_body_json(send(&state, req).await).await;
    assert_eq!(me["first_name"], "Ann");
    assert_eq!(me["isu"], 334455);
    assert_eq!(body["user_id"], me["id"]);
}

#[actix_web::test]
async fn second_registration_is_conflict() {
    let state = build_test_state(security()).await;
    let event = seed_event(&state, open_event("Party")).await;

    assert_eq!(send(&state, register(event.id, 21, json!({}))).await.status().as_u16(), 201);

    assert_problem_details_from_service_response(
        send(&state, register(event.id, 21, json!({}))).await,
        "ALREADY_REGISTERED",
        StatusCode::CONFLICT,
        None,
    )
    .await;
}

#[actix_web::test]
async fn unknown_event_is_404() {
    let state = build_test_state(security()).await;

    assert_problem_details_from_service_response(
        send(&state, register(9999, 22, json!({}))).await,
        "EVENT_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("Event not found"),
    )
    .await;
}

#[actix_web::test]
async fn closed_events_reject_registration() {
    let state = build_test_state(security()).await;
    let now = OffsetDateTime::now_utc();

    let inactive = seed_event(&state, open_event("Inactive").inactive()).await;
    let past_deadline = seed_event(
        &state,
        EventCreate::new("Deadline passed", now + Duration::days(7))
            .with_deadline(now - Duration::hours(1)),
    )
    .await;
    let already_happened =
        seed_event(&state, EventCreate::new("Yesterday", now - Duration::days(1))).await;

    for event in [inactive, past_deadline, already_happened] {
        assert_problem_details_from_service_response(
            send(&state, register(event.id, 23, json!({"first_name": "Changed"}))).await,
            "REGISTRATION_CLOSED",
            StatusCode::BAD_REQUEST,
            None,
        )
        .await;
    }

    // the profile update is part of the rejected registration
    let req = as_user(test::TestRequest::get().uri("/api/users/me"), 23);
    let me: Value = test::read_body_json(send(&state, req).await).await;
    assert_eq!(me["first_name"], "Test");
}

#[actix_web::test]
async fn invalid_user_data_rolls_back() {
    let state = build_test_state(security()).await;
    let event = seed_event(&state, open_event("Party")).await;

    assert_problem_details_from_service_response(
        send(&state, register(event.id, 24, json!({"phone": "1".repeat(51)}))).await,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
        Some("phone"),
    )
    .await;

    let req = as_user(test::TestRequest::get().uri("/api/registrations/my"), 24);
    assert_eq!(send(&state, req).await.status().as_u16(), 404);
}

#[actix_web::test]
async fn missing_user_data_is_bad_request() {
    let state = build_test_state(security()).await;
    let event = seed_event(&state, open_event("Party")).await;

    let req = as_user(
        test::TestRequest::post().uri(&format!("/api/events/{}/register", event.id)),
        25,
    )
    .set_json(json!({}));
    assert_problem_details_from_service_response(
        send(&state, req).await,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
}
