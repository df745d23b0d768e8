//! SeaORM adapter for user repository.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set};

use crate::entities::users;

pub mod dto;

pub use dto::{ProfileUpdate, UserCreate};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_user_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find_by_id(user_id).one(conn).await
}

pub async fn find_user_by_telegram_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    telegram_id: i64,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::TelegramId.eq(telegram_id))
        .one(conn)
        .await
}

/// Insert the user unless the telegram id is already known, then read it back.
///
/// Returns the row and whether this call inserted it. Concurrent first
/// requests for the same account converge on one row.
pub async fn ensure_user_by_telegram_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<(users::Model, bool), sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let telegram_id = dto.telegram_id;

    let user_active = users::ActiveModel {
        id: NotSet,
        telegram_id: Set(dto.telegram_id),
        telegram_username: Set(dto.telegram_username),
        first_name: Set(dto.first_name),
        last_name: Set(dto.last_name),
        phone: Set(None),
        isu: Set(None),
        address: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let rows = users::Entity::insert(user_active)
        .on_conflict(
            OnConflict::column(users::Column::TelegramId)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    let inserted = rows == 1;
    let user = find_user_by_telegram_id(conn, telegram_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("users.telegram_id not found".to_string()))?;

    Ok((user, inserted))
}

pub async fn update_profile<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    dto: ProfileUpdate,
) -> Result<users::Model, sea_orm::DbErr> {
    let mut user = users::ActiveModel {
        id: Set(user_id),
        ..Default::default()
    };
    if let Some(first_name) = dto.first_name {
        user.first_name = Set(first_name);
    }
    if let Some(last_name) = dto.last_name {
        user.last_name = Set(last_name);
    }
    if let Some(phone) = dto.phone {
        user.phone = Set(phone);
    }
    if let Some(isu) = dto.isu {
        user.isu = Set(isu);
    }
    if let Some(address) = dto.address {
        user.address = Set(address);
    }
    user.updated_at = Set(time::OffsetDateTime::now_utc());

    user.update(conn).await
}
