use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection};
use serde::Deserialize;
use serde_with::rust::double_option;
use tracing::{debug, info};

use crate::auth::identity::TelegramIdentity;
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::errors::ErrorCode;
use crate::repos::users::{self, ProfileUpdate, User, UserCreate};

pub const MAX_NAME_CHARS: usize = 255;
pub const MAX_PHONE_CHARS: usize = 50;
pub const MAX_ADDRESS_CHARS: usize = 500;
pub const ISU_RANGE: std::ops::RangeInclusive<i64> = 100_000..=999_999;

/// Turns a request identity into a durable user.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Look the user up by telegram id, creating it on first contact.
    ///
    /// Existing rows are returned unchanged; Telegram data never overwrites
    /// profile edits.
    async fn get_or_create(&self, identity: &TelegramIdentity) -> Result<User, AppError>;
}

/// `UserDirectory` over the application database.
pub struct SeaUserDirectory<'a> {
    conn: &'a DatabaseConnection,
}

impl<'a> SeaUserDirectory<'a> {
    pub fn new(conn: &'a DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl UserDirectory for SeaUserDirectory<'_> {
    async fn get_or_create(&self, identity: &TelegramIdentity) -> Result<User, AppError> {
        if let Some(user) = users::find_user_by_telegram_id(self.conn, identity.telegram_id).await? {
            return Ok(user);
        }

        let dto = UserCreate::new(identity.telegram_id)
            .with_username(identity.username.clone())
            .with_names(identity.first_name.clone(), identity.last_name.clone());
        let (user, inserted) = users::ensure_user(self.conn, dto).await?;

        if inserted {
            info!(
                user_id = user.id,
                auth_source = identity.source.as_str(),
                "First user creation"
            );
        } else {
            debug!(user_id = user.id, "User created concurrently by another request");
        }

        Ok(user)
    }
}

/// Partial profile update accepted by `PUT /api/users/me` and registration.
///
/// A missing field is left unchanged; an explicit `null` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    #[serde(default, with = "double_option")]
    pub first_name: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub last_name: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub isu: Option<Option<i64>>,
    #[serde(default, with = "double_option")]
    pub address: Option<Option<String>>,
}

fn check_len(field: &str, value: &Option<Option<String>>, max: usize) -> Result<(), DomainError> {
    if let Some(Some(v)) = value {
        if v.chars().count() > max {
            return Err(DomainError::invalid_field(format!(
                "{field} must be at most {max} characters"
            )));
        }
    }
    Ok(())
}

impl UserUpdate {
    /// Check field limits and produce the repository update.
    pub fn validate(self) -> Result<ProfileUpdate, DomainError> {
        check_len("first_name", &self.first_name, MAX_NAME_CHARS)?;
        check_len("last_name", &self.last_name, MAX_NAME_CHARS)?;
        check_len("phone", &self.phone, MAX_PHONE_CHARS)?;
        check_len("address", &self.address, MAX_ADDRESS_CHARS)?;

        let isu = match self.isu {
            Some(Some(isu)) if !ISU_RANGE.contains(&isu) => {
                return Err(DomainError::invalid_field(
                    "isu must be a six-digit number (100000..=999999)",
                ));
            }
            // in range, so the narrowing cannot fail
            Some(Some(isu)) => Some(Some(isu as i32)),
            Some(None) => Some(None),
            None => None,
        };

        Ok(ProfileUpdate {
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            isu,
            address: self.address,
        })
    }
}

/// Validate and apply a profile update; returns the stored user.
pub async fn update_profile<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    update: UserUpdate,
) -> Result<User, AppError> {
    let update = update.validate()?;

    if update.is_empty() {
        return users::find_user_by_id(conn, user_id)
            .await?
            .ok_or_else(|| AppError::not_found(ErrorCode::UserNotFound, "User not found"));
    }

    let user = users::update_profile(conn, user_id, update).await?;
    debug!(user_id = user.id, "Profile updated");
    Ok(user)
}
