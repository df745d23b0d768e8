//! Startup configuration read from the environment.

pub mod admins;
pub mod app;
pub mod db;

pub use admins::AdminAllowlist;
pub use app::AppConfig;
pub use db::DbProfile;
