use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::registrations::RegistrationResponse;
use super::users::UserResponse;
use crate::db::require_db;
use crate::entities::registrations::RegistrationStatus;
use crate::error::AppError;
use crate::extractors::{CurrentAdmin, ValidatedJson};
use crate::repos::registrations::{RegistrationListQuery, RegistrationWithUser, SortField, SortOrder};
use crate::services::registrations::{bulk_update_statuses, list_event_registrations};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct RegistrationWithUserResponse {
    #[serde(flatten)]
    pub registration: RegistrationResponse,
    pub user: UserResponse,
}

impl From<RegistrationWithUser> for RegistrationWithUserResponse {
    fn from(row: RegistrationWithUser) -> Self {
        Self {
            registration: RegistrationResponse::from(row.registration),
            user: UserResponse::from(row.user),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EventRegistrationsQuery {
    #[serde(default)]
    pub skip: u64,
    pub limit: Option<u64>,
    pub status: Option<RegistrationStatus>,
    #[serde(default)]
    pub sort_by: SortField,
    #[serde(default)]
    pub sort_order: SortOrder,
}

#[derive(Debug, Deserialize)]
pub struct BulkUpdateStatusRequest {
    pub registration_ids: Vec<i64>,
    pub status: RegistrationStatus,
}

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

async fn event_registrations(
    _admin: CurrentAdmin,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
    query: web::Query<EventRegistrationsQuery>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let params = query.into_inner();

    let mut list = RegistrationListQuery::for_event(path.into_inner());
    list.status = params.status;
    list.sort_by = params.sort_by;
    list.sort_order = params.sort_order;
    list.skip = params.skip;
    if let Some(limit) = params.limit {
        list.limit = limit;
    }

    let rows = list_event_registrations(db, list).await?;
    let body: Vec<RegistrationWithUserResponse> = rows
        .into_iter()
        .map(RegistrationWithUserResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

async fn bulk_update(
    admin: CurrentAdmin,
    app_state: web::Data<AppState>,
    body: ValidatedJson<BulkUpdateStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let BulkUpdateStatusRequest {
        registration_ids,
        status,
    } = body.into_inner();

    let updated = bulk_update_statuses(&app_state, &registration_ids, status).await?;
    info!(admin_id = admin.id, updated, "Admin bulk status update");

    Ok(HttpResponse::Ok().json(ActionResponse {
        success: true,
        message: format!("Successfully updated {updated} registration(s)"),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/events/{event_id}/registrations",
        web::get().to(event_registrations),
    )
    .route(
        "/registrations/bulk_update_statuses",
        web::post().to(bulk_update),
    );
}
