//! Event repository functions for domain layer.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::events_sea as events_adapter;
use crate::errors::domain::DomainError;

pub use events_adapter::EventCreate;

/// Event domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub event_date: OffsetDateTime,
    pub location: Option<String>,
    pub deadline: Option<OffsetDateTime>,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Event {
    /// Registration is open while the event is active and neither its
    /// deadline nor its date has passed.
    pub fn accepts_registrations_at(&self, now: OffsetDateTime) -> bool {
        if !self.is_active || self.event_date < now {
            return false;
        }
        self.deadline.is_none_or(|deadline| deadline >= now)
    }
}

pub async fn find_event_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    event_id: i64,
) -> Result<Option<Event>, DomainError> {
    let event = events_adapter::find_by_id(conn, event_id).await?;
    Ok(event.map(Event::from))
}

pub async fn find_current_event<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Option<Event>, DomainError> {
    let event = events_adapter::find_current_active(conn).await?;
    Ok(event.map(Event::from))
}

pub async fn list_events_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    skip: u64,
    limit: u64,
) -> Result<Vec<Event>, DomainError> {
    let events = events_adapter::list_for_user(conn, user_id, skip, limit).await?;
    Ok(events.into_iter().map(Event::from).collect())
}

pub async fn create_event<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: EventCreate,
) -> Result<Event, DomainError> {
    let event = events_adapter::create_event(conn, dto).await?;
    Ok(Event::from(event))
}

impl From<crate::entities::events::Model> for Event {
    fn from(model: crate::entities::events::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            event_date: model.event_date,
            location: model.location,
            deadline: model.deadline,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
