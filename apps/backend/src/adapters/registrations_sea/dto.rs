//! DTOs for registrations_sea adapter.

use serde::Deserialize;

use crate::entities::registrations::RegistrationStatus;

/// DTO for creating a registration. Status starts as `pending`.
#[derive(Debug, Clone)]
pub struct RegistrationCreate {
    pub user_id: i64,
    pub event_id: i64,
    pub check_in_token: String,
}

impl RegistrationCreate {
    pub fn new(user_id: i64, event_id: i64, check_in_token: impl Into<String>) -> Self {
        Self {
            user_id,
            event_id,
            check_in_token: check_in_token.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    RegisteredAt,
    /// First name, then last name.
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Filter, ordering and window for an event's registration list.
#[derive(Debug, Clone)]
pub struct RegistrationListQuery {
    pub event_id: i64,
    pub status: Option<RegistrationStatus>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    pub skip: u64,
    pub limit: u64,
}

impl RegistrationListQuery {
    pub fn for_event(event_id: i64) -> Self {
        Self {
            event_id,
            status: None,
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
            skip: 0,
            limit: 1000,
        }
    }
}
