use migration::{count_applied_migrations, Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use tracing::{info, warn};

use crate::error::AppError;

/// Refuse to serve against a schema that is behind the code.
///
/// Pending migrations are applied with `migration-cli up`, never at startup.
pub async fn ensure_schema_ready(db: &DatabaseConnection) -> Result<(), AppError> {
    let applied = count_applied_migrations(db).await?;
    let defined = Migrator::migrations().len();

    if applied < defined {
        warn!(applied, defined, "database schema is behind; run `migration-cli up`");
        return Err(AppError::config(format!(
            "database schema has {applied} of {defined} migrations applied"
        )));
    }

    info!(applied, "database schema ready");
    Ok(())
}
