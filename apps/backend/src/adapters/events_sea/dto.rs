//! DTOs for events_sea adapter.

use time::OffsetDateTime;

/// DTO for creating an event.
#[derive(Debug, Clone)]
pub struct EventCreate {
    pub title: String,
    pub description: Option<String>,
    pub event_date: OffsetDateTime,
    pub location: Option<String>,
    pub deadline: Option<OffsetDateTime>,
    pub is_active: bool,
}

impl EventCreate {
    pub fn new(title: impl Into<String>, event_date: OffsetDateTime) -> Self {
        Self {
            title: title.into(),
            description: None,
            event_date,
            location: None,
            deadline: None,
            is_active: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_deadline(mut self, deadline: OffsetDateTime) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}
