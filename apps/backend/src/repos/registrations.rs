//! Registration repository functions for domain layer.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use tracing::warn;

use crate::adapters::registrations_sea as registrations_adapter;
use crate::entities::registrations::RegistrationStatus;
use crate::errors::domain::DomainError;
use crate::repos::users::User;

pub use registrations_adapter::{
    RegistrationCreate, RegistrationListQuery, SortField, SortOrder,
};

/// Registration domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub id: i64,
    pub user_id: i64,
    pub event_id: i64,
    pub registered_at: OffsetDateTime,
    pub status: RegistrationStatus,
    pub check_in_token: String,
    pub checked_in_at: Option<OffsetDateTime>,
}

/// A registration together with the user who made it.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationWithUser {
    pub registration: Registration,
    pub user: User,
}

pub async fn find_registration<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    event_id: i64,
) -> Result<Option<Registration>, DomainError> {
    let registration =
        registrations_adapter::find_by_user_and_event(conn, user_id, event_id).await?;
    Ok(registration.map(Registration::from))
}

pub async fn create_registration<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RegistrationCreate,
) -> Result<Registration, DomainError> {
    let registration = registrations_adapter::create_registration(conn, dto).await?;
    Ok(Registration::from(registration))
}

pub async fn list_registrations_with_users<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    query: RegistrationListQuery,
) -> Result<Vec<RegistrationWithUser>, DomainError> {
    let rows = registrations_adapter::list_for_event_with_users(conn, query).await?;

    Ok(rows
        .into_iter()
        .filter_map(|(registration, user)| match user {
            Some(user) => Some(RegistrationWithUser {
                registration: Registration::from(registration),
                user: User::from(user),
            }),
            None => {
                warn!(registration_id = registration.id, "Registration without user row");
                None
            }
        })
        .collect())
}

pub async fn bulk_update_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    registration_ids: &[i64],
    status: RegistrationStatus,
) -> Result<u64, DomainError> {
    let updated = registrations_adapter::bulk_update_status(conn, registration_ids, status).await?;
    Ok(updated)
}

impl From<crate::entities::registrations::Model> for Registration {
    fn from(model: crate::entities::registrations::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            event_id: model.event_id,
            registered_at: model.registered_at,
            status: model.status,
            check_in_token: model.check_in_token,
            checked_in_at: model.checked_in_at,
        }
    }
}
