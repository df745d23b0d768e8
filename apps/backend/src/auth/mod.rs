//! Telegram Mini App authentication.

pub mod identity;
pub mod init_data;

pub use identity::{AuthSource, TelegramIdentity};
pub use init_data::{InitData, InitDataError, InitDataVerifier};
