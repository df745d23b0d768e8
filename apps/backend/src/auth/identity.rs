//! Request-scoped Telegram identity produced by the init-data verifier.

use serde::Serialize;

/// Username given to identities synthesized by the development bypass.
pub const DEV_USERNAME: &str = "dev_user";

/// Where an identity came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthSource {
    /// Signature and freshness checked against the bot token.
    Telegram,
    /// Synthesized by the development bypass; nothing was verified.
    DevBypass,
}

impl AuthSource {
    pub const fn as_str(&self) -> &'static str {
        match self {
            AuthSource::Telegram => "telegram",
            AuthSource::DevBypass => "dev_bypass",
        }
    }
}

/// The caller's Telegram account as asserted by `initData`.
///
/// Lives for one request and is never stored as-is; `UserDirectory` turns it
/// into a durable user row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramIdentity {
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub language_code: Option<String>,
    pub is_premium: bool,
    pub source: AuthSource,
}

impl TelegramIdentity {
    /// Identity for a bypassed request.
    pub fn dev_bypass(telegram_id: i64) -> Self {
        Self {
            telegram_id,
            username: Some(DEV_USERNAME.to_string()),
            first_name: None,
            last_name: None,
            language_code: None,
            is_premium: false,
            source: AuthSource::DevBypass,
        }
    }

    pub fn is_verified(&self) -> bool {
        self.source == AuthSource::Telegram
    }
}
