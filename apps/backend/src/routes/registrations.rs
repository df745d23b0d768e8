use actix_web::{web, HttpResponse};
use serde::Serialize;
use time::OffsetDateTime;

use crate::db::require_db;
use crate::entities::registrations::RegistrationStatus;
use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::repos::registrations::Registration;
use crate::services::registrations::registration_for_active_event;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct RegistrationResponse {
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub registered_at: OffsetDateTime,
    pub status: RegistrationStatus,
    pub check_in_token: String,
    #[serde(with = "time::serde::rfc3339::option")]
    pub checked_in_at: Option<OffsetDateTime>,
}

impl From<Registration> for RegistrationResponse {
    fn from(registration: Registration) -> Self {
        Self {
            id: registration.id,
            event_id: registration.event_id,
            user_id: registration.user_id,
            registered_at: registration.registered_at,
            status: registration.status,
            check_in_token: registration.check_in_token,
            checked_in_at: registration.checked_in_at,
        }
    }
}

async fn my_registration(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let registration = registration_for_active_event(db, current_user.id).await?;
    Ok(HttpResponse::Ok().json(RegistrationResponse::from(registration)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/my", web::get().to(my_registration));
}
