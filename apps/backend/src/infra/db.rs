use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{sanitize_db_url, DbKind, DbProfile};
use crate::error::AppError;

const POSTGRES_CONNECT_ATTEMPTS: u32 = 5;
const POSTGRES_RETRY_INTERVAL: Duration = Duration::from_millis(500);

fn connect_options(profile: &DbProfile, kind: DbKind) -> ConnectOptions {
    let mut opt = ConnectOptions::new(profile.url().to_string());
    opt.acquire_timeout(Duration::from_secs(5)).sqlx_logging(false);

    // Every connection to `sqlite::memory:` is its own database, so the pool
    // must hold exactly one.
    if kind == DbKind::SqliteMemory {
        opt.min_connections(1).max_connections(1);
    } else {
        opt.max_connections(10);
    }
    opt
}

/// Open a pool for `profile`. Postgres is retried briefly so the backend can
/// start alongside its database. Does not run migrations.
pub async fn connect_db(profile: &DbProfile) -> Result<DatabaseConnection, AppError> {
    let kind = profile.kind()?;
    let opt = connect_options(profile, kind);
    let attempts = if kind == DbKind::Postgres {
        POSTGRES_CONNECT_ATTEMPTS
    } else {
        1
    };

    let mut attempt = 1;
    loop {
        match Database::connect(opt.clone()).await {
            Ok(conn) => {
                info!(db_kind = ?kind, url = %sanitize_db_url(profile.url()), attempt, "database connected");
                return Ok(conn);
            }
            Err(e) if attempt < attempts => {
                warn!(db_kind = ?kind, attempt, max_attempts = attempts, error = %e, "database connection failed, retrying");
                tokio::time::sleep(POSTGRES_RETRY_INTERVAL).await;
                attempt += 1;
            }
            Err(e) => {
                return Err(AppError::config(format!(
                    "failed to connect to {}: {e}",
                    sanitize_db_url(profile.url())
                )))
            }
        }
    }
}

/// Connect and make the schema usable: in-memory databases are migrated on
/// the spot, everything else must already be at the latest migration.
pub async fn bootstrap_db(profile: &DbProfile) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(profile).await?;

    if profile.kind()? == DbKind::SqliteMemory {
        migrate(&conn, MigrationCommand::Up).await?;
    } else {
        super::schema_guard::ensure_schema_ready(&conn).await?;
    }

    Ok(conn)
}
