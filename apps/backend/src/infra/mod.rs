//! Infrastructure layer: database connection, state building, error mapping.

pub mod db;
pub mod db_errors;
pub mod schema_guard;
pub mod state;
