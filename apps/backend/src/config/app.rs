//! Process configuration, read once at startup.
//!
//! | Variable               | Default                    |
//! |------------------------|----------------------------|
//! | `TELEGRAM_BOT_TOKEN`   | required                   |
//! | `DATABASE_URL`         | required                   |
//! | `ADMIN_TELEGRAM_IDS`   | empty                      |
//! | `DEV_AUTH_BYPASS`      | `false`                    |
//! | `DEV_USER_TELEGRAM_ID` | `1`                        |
//! | `BACKEND_HOST`         | `0.0.0.0`                  |
//! | `BACKEND_PORT`         | `8000`                     |
//! | `CORS_ALLOWED_ORIGINS` | `https://web.telegram.org` |

use std::fmt;

use super::admins::AdminAllowlist;
use crate::error::AppError;
use crate::middleware::cors::parse_allowed_origins;

pub const DEFAULT_DEV_USER_TELEGRAM_ID: i64 = 1;

#[derive(Clone)]
pub struct AppConfig {
    pub bot_token: String,
    pub database_url: String,
    pub admins: AdminAllowlist,
    pub dev_auth_bypass: bool,
    pub dev_user_telegram_id: i64,
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("bot_token", &"***")
            .field(
                "database_url",
                &super::db::sanitize_db_url(&self.database_url),
            )
            .field("admins", &self.admins.len())
            .field("dev_auth_bypass", &self.dev_auth_bypass)
            .field("dev_user_telegram_id", &self.dev_user_telegram_id)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .finish()
    }
}

fn parse_flag(name: &str, raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "off" => Ok(false),
        "1" | "true" | "yes" | "on" => Ok(true),
        other => Err(AppError::config(format!(
            "{name} must be a boolean, got '{other}'"
        ))),
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; `from_env` passes the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let required = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| {
                    AppError::config(format!("Required environment variable '{name}' is not set"))
                })
        };

        let bot_token = required("TELEGRAM_BOT_TOKEN")?;
        let database_url = required("DATABASE_URL")?;

        let admins = AdminAllowlist::parse(&lookup("ADMIN_TELEGRAM_IDS").unwrap_or_default())?;
        let dev_auth_bypass = parse_flag(
            "DEV_AUTH_BYPASS",
            &lookup("DEV_AUTH_BYPASS").unwrap_or_default(),
        )?;

        let dev_user_telegram_id = match lookup("DEV_USER_TELEGRAM_ID") {
            Some(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|id| *id > 0)
                .ok_or_else(|| {
                    AppError::config("DEV_USER_TELEGRAM_ID must be a positive integer")
                })?,
            _ => DEFAULT_DEV_USER_TELEGRAM_ID,
        };

        let host = lookup("BACKEND_HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match lookup("BACKEND_PORT") {
            Some(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| AppError::config("BACKEND_PORT must be a valid port number"))?,
            _ => 8000,
        };

        let cors_allowed_origins =
            parse_allowed_origins(&lookup("CORS_ALLOWED_ORIGINS").unwrap_or_default());

        Ok(Self {
            bot_token,
            database_url,
            admins,
            dev_auth_bypass,
            dev_user_telegram_id,
            host,
            port,
            cors_allowed_origins,
        })
    }
}
