pub mod txn;

use sea_orm::DatabaseConnection;

use crate::error::AppError;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::state::app_state::AppState;

/// The canonical way for handlers to reach the database.
pub fn require_db(state: &AppState) -> Result<&DatabaseConnection, AppError> {
    state.db().ok_or_else(|| {
        DomainError::infra(InfraErrorKind::DbUnavailable, "Database not configured").into()
    })
}
