use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::registrations::RegistrationResponse;
use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::repos::events::Event;
use crate::services::events::current_event;
use crate::services::registrations::register_for_event;
use crate::services::users::UserUpdate;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub event_date: OffsetDateTime,
    pub location: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub deadline: Option<OffsetDateTime>,
    pub is_active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            event_date: event.event_date,
            location: event.location,
            deadline: event.deadline,
            is_active: event.is_active,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub user_data: UserUpdate,
}

async fn get_current_event(
    _current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let event = current_event(db).await?;
    Ok(HttpResponse::Ok().json(EventResponse::from(event)))
}

async fn register(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
    body: ValidatedJson<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let event_id = path.into_inner();
    let RegisterRequest { user_data } = body.into_inner();

    let registration = register_for_event(&app_state, current_user.id, event_id, user_data).await?;
    Ok(HttpResponse::Created().json(RegistrationResponse::from(registration)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/current", web::get().to(get_current_event))
        .route("/{event_id}/register", web::post().to(register));
}
