//! DTOs for users_sea adapter.

/// DTO for inserting a user seen for the first time.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub telegram_id: i64,
    pub telegram_username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl UserCreate {
    pub fn new(telegram_id: i64) -> Self {
        Self {
            telegram_id,
            telegram_username: None,
            first_name: None,
            last_name: None,
        }
    }

    pub fn with_username(mut self, username: Option<String>) -> Self {
        self.telegram_username = username;
        self
    }

    pub fn with_names(mut self, first_name: Option<String>, last_name: Option<String>) -> Self {
        self.first_name = first_name;
        self.last_name = last_name;
        self
    }
}

/// DTO for a partial profile update.
///
/// Outer `None` leaves the column untouched; `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub first_name: Option<Option<String>>,
    pub last_name: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub isu: Option<Option<i32>>,
    pub address: Option<Option<String>>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone.is_none()
            && self.isu.is_none()
            && self.address.is_none()
    }
}
