use actix_web::{test, web, App, HttpResponse};
use gazbot_backend::extractors::{CurrentAdmin, CurrentUser, ValidatedJson};
use gazbot_backend::{AppError, AppState, RequestTrace};
use serde_json::{json, Value};

use crate::support::{as_user, build_test_state, security_with_admins};

const ADMIN: i64 = 700;

async fn user_echo(
    user: CurrentUser,
    body: ValidatedJson<Value>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(json!({"telegram_id": user.telegram_id, "body": body.into_inner()})))
}

async fn admin_echo(
    admin: CurrentAdmin,
    body: ValidatedJson<Value>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(json!({"telegram_id": admin.telegram_id, "body": body.into_inner()})))
}

async fn call(state: &AppState, req: test::TestRequest) -> Value {
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(web::Data::new(state.clone()))
            .route("/user", web::post().to(user_echo))
            .route("/admin", web::post().to(admin_echo)),
    )
    .await;
    let resp = test::call_service(&app, req.to_request()).await;
    assert_eq!(resp.status().as_u16(), 200);
    test::read_body_json(resp).await
}

#[actix_web::test]
async fn json_body_reaches_handler_after_current_user() {
    let state = build_test_state(security_with_admins(&[ADMIN])).await;

    let req = as_user(test::TestRequest::post().uri("/user"), 701)
        .set_json(json!({"first_name": "Ivan"}));
    let body = call(&state, req).await;

    assert_eq!(body["telegram_id"], 701);
    assert_eq!(body["body"]["first_name"], "Ivan");
}

#[actix_web::test]
async fn json_body_reaches_handler_after_current_admin() {
    let state = build_test_state(security_with_admins(&[ADMIN])).await;

    let req = as_user(test::TestRequest::post().uri("/admin"), ADMIN)
        .set_json(json!({"registration_ids": [1, 2]}));
    let body = call(&state, req).await;

    assert_eq!(body["telegram_id"], ADMIN);
    assert_eq!(body["body"]["registration_ids"], json!([1, 2]));
}
