//! User repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::users_sea as users_adapter;
use crate::errors::domain::DomainError;

pub use users_adapter::{ProfileUpdate, UserCreate};

/// User domain model
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub telegram_id: i64,
    pub telegram_username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub isu: Option<i32>,
    pub address: Option<String>,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
}

pub async fn find_user_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_user_by_id(conn, user_id).await?;
    Ok(user.map(User::from))
}

pub async fn find_user_by_telegram_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    telegram_id: i64,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_user_by_telegram_id(conn, telegram_id).await?;
    Ok(user.map(User::from))
}

/// Returns the user and `true` when this call created it.
pub async fn ensure_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<(User, bool), DomainError> {
    let (user, inserted) = users_adapter::ensure_user_by_telegram_id(conn, dto).await?;
    Ok((User::from(user), inserted))
}

pub async fn update_profile<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    update: ProfileUpdate,
) -> Result<User, DomainError> {
    let user = users_adapter::update_profile(conn, user_id, update).await?;
    Ok(User::from(user))
}

impl From<crate::entities::users::Model> for User {
    fn from(model: crate::entities::users::Model) -> Self {
        Self {
            id: model.id,
            telegram_id: model.telegram_id,
            telegram_username: model.telegram_username,
            first_name: model.first_name,
            last_name: model.last_name,
            phone: model.phone,
            isu: model.isu,
            address: model.address,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
