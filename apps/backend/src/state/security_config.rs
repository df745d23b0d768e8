use crate::auth::InitDataVerifier;
use crate::config::{AdminAllowlist, AppConfig};

/// Development bypass settings. Present only when `DEV_AUTH_BYPASS` is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DevBypass {
    /// Telegram id used when a bypassed request carries no init data.
    pub default_telegram_id: i64,
}

/// Everything request authentication needs, resolved at startup.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub verifier: InitDataVerifier,
    pub admins: AdminAllowlist,
    pub dev_bypass: Option<DevBypass>,
}

impl SecurityConfig {
    pub fn new(bot_token: &str) -> Self {
        Self {
            verifier: InitDataVerifier::new(bot_token),
            admins: AdminAllowlist::default(),
            dev_bypass: None,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let dev_bypass = config.dev_auth_bypass.then_some(DevBypass {
            default_telegram_id: config.dev_user_telegram_id,
        });

        Self {
            verifier: InitDataVerifier::new(&config.bot_token),
            admins: config.admins.clone(),
            dev_bypass,
        }
    }

    pub fn with_admins(mut self, admins: AdminAllowlist) -> Self {
        self.admins = admins;
        self
    }

    pub fn with_dev_bypass(mut self, default_telegram_id: i64) -> Self {
        self.dev_bypass = Some(DevBypass {
            default_telegram_id,
        });
        self
    }
}
