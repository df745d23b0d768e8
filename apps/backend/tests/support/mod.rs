#![allow(dead_code)]

//! Shared fixtures for integration tests: in-memory state, signed init
//! data, seeded events and a request helper.

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::{test, web, App};
use gazbot_backend::auth::init_data::encode_signed;
use gazbot_backend::config::{AdminAllowlist, DbProfile};
use gazbot_backend::middleware::cors::INIT_DATA_HEADER;
use gazbot_backend::repos::events::{self, Event, EventCreate};
use gazbot_backend::{build_state, routes, AppState, RequestTrace, SecurityConfig};
use time::{Duration, OffsetDateTime};

pub const BOT_TOKEN: &str = "7000000001:AAtest-token-for-integration-suites";

pub fn security() -> SecurityConfig {
    SecurityConfig::new(BOT_TOKEN)
}

pub fn security_with_admins(admin_ids: &[i64]) -> SecurityConfig {
    security().with_admins(AdminAllowlist::from_ids(admin_ids.iter().copied()))
}

/// Fresh, migrated in-memory database.
pub async fn build_test_state(security: SecurityConfig) -> AppState {
    build_state()
        .with_db(DbProfile::InMemory)
        .with_security(security)
        .build()
        .await
        .expect("in-memory state")
}

pub async fn build_state_without_db() -> AppState {
    build_state()
        .with_security(security())
        .build()
        .await
        .expect("state without db")
}

/// Init data for `telegram_id` signed with `BOT_TOKEN`, issued `age_secs` ago.
pub fn init_data_aged(telegram_id: i64, first_name: &str, age_secs: i64) -> String {
    let auth_date = (OffsetDateTime::now_utc().unix_timestamp() - age_secs).to_string();
    let user = serde_json::json!({
        "id": telegram_id,
        "first_name": first_name,
        "username": format!("tg_{telegram_id}"),
        "language_code": "ru",
    })
    .to_string();

    encode_signed(
        &[
            ("query_id", "AAHdF6IQAAAAAN0XohDhrOrc"),
            ("user", user.as_str()),
            ("auth_date", auth_date.as_str()),
        ],
        BOT_TOKEN,
    )
}

pub fn init_data(telegram_id: i64, first_name: &str) -> String {
    init_data_aged(telegram_id, first_name, 5)
}

/// Attach init data for `telegram_id` to a request.
pub fn as_user(req: test::TestRequest, telegram_id: i64) -> test::TestRequest {
    req.insert_header((INIT_DATA_HEADER, init_data(telegram_id, "Test")))
}

/// Run one request through the production routes.
pub async fn send(state: &AppState, req: test::TestRequest) -> ServiceResponse<BoxBody> {
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure),
    )
    .await;
    test::call_service(&app, req.to_request()).await
}

pub async fn seed_event(state: &AppState, dto: EventCreate) -> Event {
    let db = state.db().expect("db");
    events::create_event(db, dto).await.expect("create event")
}

/// Active event a week out with a deadline in three days.
pub fn open_event(title: &str) -> EventCreate {
    let now = OffsetDateTime::now_utc();
    EventCreate::new(title, now + Duration::days(7)).with_deadline(now + Duration::days(3))
}
