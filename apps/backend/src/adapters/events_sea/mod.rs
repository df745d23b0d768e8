//! SeaORM adapter for events.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::{events, registrations};

pub mod dto;

pub use dto::EventCreate;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    event_id: i64,
) -> Result<Option<events::Model>, sea_orm::DbErr> {
    events::Entity::find_by_id(event_id).one(conn).await
}

/// The active event with the latest `event_date`.
pub async fn find_current_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Option<events::Model>, sea_orm::DbErr> {
    events::Entity::find()
        .filter(events::Column::IsActive.eq(true))
        .order_by_desc(events::Column::EventDate)
        .order_by_desc(events::Column::Id)
        .one(conn)
        .await
}

/// Events the user holds a registration for, newest first.
pub async fn list_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    skip: u64,
    limit: u64,
) -> Result<Vec<events::Model>, sea_orm::DbErr> {
    events::Entity::find()
        .inner_join(registrations::Entity)
        .filter(registrations::Column::UserId.eq(user_id))
        .order_by_desc(events::Column::EventDate)
        .order_by_desc(events::Column::Id)
        .offset(skip)
        .limit(limit)
        .all(conn)
        .await
}

pub async fn create_event<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: EventCreate,
) -> Result<events::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let event_active = events::ActiveModel {
        id: NotSet,
        title: Set(dto.title),
        description: Set(dto.description),
        event_date: Set(dto.event_date),
        location: Set(dto.location),
        deadline: Set(dto.deadline),
        is_active: Set(dto.is_active),
        created_at: Set(now),
        updated_at: Set(now),
    };

    event_active.insert(conn).await
}
