//! SeaORM adapter for registrations.

use sea_orm::sea_query::Order;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::registrations::{self, RegistrationStatus};
use crate::entities::users;

pub mod dto;

pub use dto::{RegistrationCreate, RegistrationListQuery, SortField, SortOrder};

pub async fn find_by_user_and_event<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    event_id: i64,
) -> Result<Option<registrations::Model>, sea_orm::DbErr> {
    registrations::Entity::find()
        .filter(registrations::Column::UserId.eq(user_id))
        .filter(registrations::Column::EventId.eq(event_id))
        .one(conn)
        .await
}

pub async fn create_registration<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RegistrationCreate,
) -> Result<registrations::Model, sea_orm::DbErr> {
    let registration_active = registrations::ActiveModel {
        id: NotSet,
        user_id: Set(dto.user_id),
        event_id: Set(dto.event_id),
        registered_at: Set(time::OffsetDateTime::now_utc()),
        status: Set(RegistrationStatus::Pending),
        check_in_token: Set(dto.check_in_token),
        checked_in_at: Set(None),
    };

    registration_active.insert(conn).await
}

/// Registrations of one event joined with their users.
pub async fn list_for_event_with_users<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    query: RegistrationListQuery,
) -> Result<Vec<(registrations::Model, Option<users::Model>)>, sea_orm::DbErr> {
    let order = match query.sort_order {
        SortOrder::Asc => Order::Asc,
        SortOrder::Desc => Order::Desc,
    };

    let mut select = registrations::Entity::find()
        .filter(registrations::Column::EventId.eq(query.event_id))
        .find_also_related(users::Entity);

    if let Some(status) = query.status {
        select = select.filter(registrations::Column::Status.eq(status));
    }

    select = match query.sort_by {
        SortField::RegisteredAt => {
            select.order_by(registrations::Column::RegisteredAt, order.clone())
        }
        SortField::Name => select
            .order_by(users::Column::FirstName, order.clone())
            .order_by(users::Column::LastName, order.clone()),
    };

    select
        .order_by(registrations::Column::Id, order)
        .offset(query.skip)
        .limit(query.limit)
        .all(conn)
        .await
}

/// Set `status` on every listed registration; returns how many rows changed.
pub async fn bulk_update_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    registration_ids: &[i64],
    status: RegistrationStatus,
) -> Result<u64, sea_orm::DbErr> {
    let result = registrations::Entity::update_many()
        .set(registrations::ActiveModel {
            status: Set(status),
            ..Default::default()
        })
        .filter(registrations::Column::Id.is_in(registration_ids.iter().copied()))
        .exec(conn)
        .await?;

    Ok(result.rows_affected)
}
