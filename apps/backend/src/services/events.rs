//! Event queries used by the user-facing routes.

use sea_orm::ConnectionTrait;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::events::{self, Event};

pub const DEFAULT_USER_EVENTS_LIMIT: u64 = 100;
pub const MAX_USER_EVENTS_LIMIT: u64 = 100;

/// The active event with the latest date.
pub async fn current_event<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<Event, AppError> {
    events::find_current_event(conn)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::EventNotFound, "Active event not found"))
}

pub async fn require_event<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    event_id: i64,
) -> Result<Event, AppError> {
    events::find_event_by_id(conn, event_id)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::EventNotFound, "Event not found"))
}

/// Events the user registered for, newest first.
pub async fn events_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    skip: u64,
    limit: u64,
) -> Result<Vec<Event>, AppError> {
    if !(1..=MAX_USER_EVENTS_LIMIT).contains(&limit) {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            format!("limit must be between 1 and {MAX_USER_EVENTS_LIMIT}"),
        ));
    }
    Ok(events::list_events_for_user(conn, user_id, skip, limit).await?)
}
