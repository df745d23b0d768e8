use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use gazbot_backend::repos::events::EventCreate;
use serde_json::{json, Value};
use time::{Duration, OffsetDateTime};

use crate::support::{as_user, build_test_state, open_event, security, seed_event, send};

#[actix_web::test]
async fn update_me_sets_and_clears_fields() {
    let state = build_test_state(security()).await;

    let req = as_user(test::TestRequest::put().uri("/api/users/me"), 10).set_json(json!({
        "first_name": "Иван",
        "last_name": "Иванов",
        "phone": "+79991234567",
        "isu": 123456,
        "address": "Kronverksky 49"
    }));
    let resp = send(&state, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["first_name"], "Иван");
    assert_eq!(body["isu"], 123456);

    // omitted fields stay, explicit null clears
    let req = as_user(test::TestRequest::put().uri("/api/users/me"), 10)
        .set_json(json!({"phone": null}));
    let body: Value = test::read_body_json(send(&state, req).await).await;
    assert_eq!(body["phone"], Value::Null);
    assert_eq!(body["last_name"], "Иванов");
    assert_eq!(body["address"], "Kronverksky 49");
}

#[actix_web::test]
async fn empty_update_returns_profile_unchanged() {
    let state = build_test_state(security()).await;

    let req = as_user(test::TestRequest::put().uri("/api/users/me"), 11).set_json(json!({}));
    let resp = send(&state, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["telegram_id"], 11);
}

#[actix_web::test]
async fn out_of_range_isu_is_validation_error() {
    let state = build_test_state(security()).await;

    let req = as_user(test::TestRequest::put().uri("/api/users/me"), 12)
        .set_json(json!({"isu": 12345}));
    assert_problem_details_from_service_response(
        send(&state, req).await,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
        Some("isu"),
    )
    .await;
}

#[actix_web::test]
async fn long_address_is_validation_error() {
    let state = build_test_state(security()).await;

    let req = as_user(test::TestRequest::put().uri("/api/users/me"), 13)
        .set_json(json!({"address": "x".repeat(501)}));
    assert_problem_details_from_service_response(
        send(&state, req).await,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
        Some("address"),
    )
    .await;
}

#[actix_web::test]
async fn malformed_json_is_bad_request() {
    let state = build_test_state(security()).await;

    let req = as_user(test::TestRequest::put().uri("/api/users/me"), 14)
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"first_name\": ");
    assert_problem_details_from_service_response(
        send(&state, req).await,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("Invalid JSON"),
    )
    .await;
}

#[actix_web::test]
async fn my_events_lists_registered_events_newest_first() {
    let state = build_test_state(security()).await;
    let now = OffsetDateTime::now_utc();

    let sooner = seed_event(&state, open_event("Sooner")).await;
    let later = seed_event(
        &state,
        EventCreate::new("Later", now + Duration::days(30)).with_deadline(now + Duration::days(20)),
    )
    .await;
    seed_event(&state, open_event("Not registered")).await;

    for event_id in [sooner.id, later.id] {
        let req = as_user(
            test::TestRequest::post().uri(&format!("/api/events/{event_id}/register")),
            15,
        )
        .set_json(json!({"user_data": {}}));
        assert_eq!(send(&state, req).await.status().as_u16(), 201);
    }

    let req = as_user(test::TestRequest::get().uri("/api/users/me/events"), 15);
    let body: Value = test::read_body_json(send(&state, req).await).await;
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Later", "Sooner"]);

    let req = as_user(test::TestRequest::get().uri("/api/users/me/events?skip=1&limit=1"), 15);
    let body: Value = test::read_body_json(send(&state, req).await).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["title"], "Sooner");
}

#[actix_web::test]
async fn my_events_rejects_bad_limits() {
    let state = build_test_state(security()).await;

    for uri in ["/api/users/me/events?limit=0", "/api/users/me/events?limit=101"] {
        let req = as_user(test::TestRequest::get().uri(uri), 16);
        assert_problem_details_from_service_response(
            send(&state, req).await,
            "VALIDATION_ERROR",
            StatusCode::BAD_REQUEST,
            Some("limit"),
        )
        .await;
    }

    let req = as_user(test::TestRequest::get().uri("/api/users/me/events?skip=-1"), 16);
    assert_problem_details_from_service_response(
        send(&state, req).await,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
}
