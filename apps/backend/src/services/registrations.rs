//! Registration workflow and admin operations.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use tracing::info;

use crate::db::require_db;
use crate::db::txn::with_txn;
use crate::entities::registrations::RegistrationStatus;
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::errors::ErrorCode;
use crate::repos::registrations::{
    self, Registration, RegistrationCreate, RegistrationListQuery, RegistrationWithUser,
};
use crate::services::events::{current_event, require_event};
use crate::services::users::{self, UserUpdate};
use crate::state::app_state::AppState;

pub const MAX_ADMIN_LIST_LIMIT: u64 = 1000;

/// 32 random bytes, URL-safe base64 without padding (43 chars).
pub fn generate_check_in_token() -> String {
    let bytes: [u8; 32] = rand::random();
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Register the user for an event, updating their profile on the way.
///
/// Runs in one transaction: a rejected registration leaves the profile
/// untouched.
pub async fn register_for_event(
    state: &AppState,
    user_id: i64,
    event_id: i64,
    user_data: UserUpdate,
) -> Result<Registration, AppError> {
    let registration = with_txn(state, move |txn| {
        Box::pin(async move {
            let event = require_event(txn, event_id).await?;

            if !event.accepts_registrations_at(OffsetDateTime::now_utc()) {
                return Err(DomainError::registration_closed(
                    "Registration for this event is closed",
                )
                .into());
            }

            users::update_profile(txn, user_id, user_data).await?;

            if registrations::find_registration(txn, user_id, event_id)
                .await?
                .is_some()
            {
                return Err(DomainError::conflict(
                    ConflictKind::AlreadyRegistered,
                    "User is already registered for this event",
                )
                .into());
            }

            let dto = RegistrationCreate::new(user_id, event_id, generate_check_in_token());
            Ok(registrations::create_registration(txn, dto).await?)
        })
    })
    .await?;

    info!(
        user_id,
        event_id,
        registration_id = registration.id,
        "Registration created"
    );
    Ok(registration)
}

/// The user's registration for the current active event.
pub async fn registration_for_active_event<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Registration, AppError> {
    let event = current_event(conn).await?;

    registrations::find_registration(conn, user_id, event.id)
        .await?
        .ok_or_else(|| {
            AppError::not_found(
                ErrorCode::RegistrationNotFound,
                "User registration for active event not found",
            )
        })
}

pub async fn list_event_registrations<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    query: RegistrationListQuery,
) -> Result<Vec<RegistrationWithUser>, AppError> {
    if !(1..=MAX_ADMIN_LIST_LIMIT).contains(&query.limit) {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            format!("limit must be between 1 and {MAX_ADMIN_LIST_LIMIT}"),
        ));
    }

    require_event(conn, query.event_id).await?;
    Ok(registrations::list_registrations_with_users(conn, query).await?)
}

/// Set one status on many registrations. Returns how many were updated.
pub async fn bulk_update_statuses(
    state: &AppState,
    registration_ids: &[i64],
    status: RegistrationStatus,
) -> Result<u64, AppError> {
    if registration_ids.is_empty() {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            "registration_ids must contain at least one id",
        ));
    }

    let db = require_db(state)?;
    let updated = registrations::bulk_update_status(db, registration_ids, status).await?;

    if updated == 0 {
        return Err(AppError::not_found(
            ErrorCode::RegistrationNotFound,
            "No registrations found with provided IDs",
        ));
    }

    info!(
        updated,
        requested = registration_ids.len(),
        status = ?status,
        "Registration statuses updated"
    );
    Ok(updated)
}
