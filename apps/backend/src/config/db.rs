use crate::error::AppError;

/// Which database the backend runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbProfile {
    /// Connect to `DATABASE_URL` (Postgres or a SQLite file). The schema must
    /// already be migrated by `migration-cli`.
    Url(String),
    /// Fresh in-memory SQLite, migrated on connect. Used by tests.
    InMemory,
}

/// Backend family of a connection URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    SqliteFile,
    SqliteMemory,
}

impl DbProfile {
    pub fn kind(&self) -> Result<DbKind, AppError> {
        match self {
            DbProfile::InMemory => Ok(DbKind::SqliteMemory),
            DbProfile::Url(url) => DbKind::from_url(url),
        }
    }

    pub fn url(&self) -> &str {
        match self {
            DbProfile::InMemory => "sqlite::memory:",
            DbProfile::Url(url) => url,
        }
    }
}

impl DbKind {
    pub fn from_url(url: &str) -> Result<Self, AppError> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(DbKind::Postgres)
        } else if url.starts_with("sqlite:") && url.contains(":memory:") {
            Ok(DbKind::SqliteMemory)
        } else if url.starts_with("sqlite:") {
            Ok(DbKind::SqliteFile)
        } else {
            Err(AppError::config(format!(
                "Unsupported DATABASE_URL scheme in '{}'",
                sanitize_db_url(url)
            )))
        }
    }
}

/// Mask the password of a connection URL for logs and error messages.
pub fn sanitize_db_url(url: &str) -> String {
    let Some((auth, host)) = url.rsplit_once('@') else {
        return url.to_string();
    };
    match auth.rfind(':') {
        Some(colon) if colon > auth.find("://").map_or(0, |i| i + 2) => {
            format!("{}:***@{host}", &auth[..colon])
        }
        _ => url.to_string(),
    }
}
