pub mod current_admin;
pub mod current_user;
pub mod telegram_auth;
pub mod validated_json;

pub use current_admin::CurrentAdmin;
pub use current_user::CurrentUser;
pub use telegram_auth::TelegramAuth;
pub use validated_json::ValidatedJson;
