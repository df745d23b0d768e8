use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::events::EventResponse;
use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::repos::users::User;
use crate::services::events::{events_for_user, DEFAULT_USER_EVENTS_LIMIT};
use crate::services::users::{update_profile, UserUpdate};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub telegram_id: i64,
    pub telegram_username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub isu: Option<i32>,
    pub address: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            telegram_id: user.telegram_id,
            telegram_username: user.telegram_username,
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
            isu: user.isu,
            address: user.address,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MyEventsQuery {
    #[serde(default)]
    pub skip: u64,
    pub limit: Option<u64>,
}

async fn get_me(current_user: CurrentUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(UserResponse::from(current_user.0)))
}

async fn update_me(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    body: ValidatedJson<UserUpdate>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let user = update_profile(db, current_user.id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

async fn my_events(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    query: web::Query<MyEventsQuery>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let limit = query.limit.unwrap_or(DEFAULT_USER_EVENTS_LIMIT);
    let events = events_for_user(db, current_user.id, query.skip, limit).await?;

    let body: Vec<EventResponse> = events.into_iter().map(EventResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/me")
            .route(web::get().to(get_me))
            .route(web::put().to(update_me)),
    )
    .route("/me/events", web::get().to(my_events));
}
