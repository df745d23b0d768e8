use actix_web::test;
use serde_json::Value;

use crate::support::{build_state_without_db, build_test_state, security, send};

#[actix_web::test]
async fn root_reports_running() {
    let state = build_state_without_db().await;

    let resp = send(&state, test::TestRequest::get().uri("/")).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "GazBot API");
    assert_eq!(body["status"], "running");
}

#[actix_web::test]
async fn health_reports_db_and_migration() {
    let state = build_test_state(security()).await;

    let resp = send(&state, test::TestRequest::get().uri("/health")).await;
    assert_eq!(resp.status().as_u16(), 200);
    assert!(resp.headers().contains_key("x-request-id"));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert_eq!(body["migrations"], "m20251001_000001_init");
    assert_eq!(body["app_version"], env!("CARGO_PKG_VERSION"));
    assert!(body.get("db_error").is_none());
}

#[actix_web::test]
async fn health_without_db_still_answers() {
    let state = build_state_without_db().await;

    let resp = send(&state, test::TestRequest::get().uri("/health")).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["db"], "error");
    assert_eq!(body["migrations"], "unknown");
}

#[actix_web::test]
async fn health_needs_no_init_data() {
    let state = build_test_state(security()).await;
    let resp = send(&state, test::TestRequest::get().uri("/health")).await;
    assert_ne!(resp.status().as_u16(), 401);
}
