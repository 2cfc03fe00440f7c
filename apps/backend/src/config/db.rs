use std::env;
use std::path::PathBuf;

use crate::error::AppError;

/// Database profile enum for different environments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbProfile {
    /// Production database profile
    Prod,
    /// Test database profile - enforces safety rules
    Test,
}

/// Which engine backs the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    SqliteFile,
    /// Private to the process; gone when the pool closes
    SqliteMemory,
}

impl DbKind {
    /// Reads `ROSHAMBO_DB_KIND` (`postgres`, `sqlite`, `memory`), defaulting to Postgres.
    pub fn from_env() -> Result<Self, AppError> {
        match env::var("ROSHAMBO_DB_KIND") {
            Err(_) => Ok(DbKind::Postgres),
            Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "postgres" | "postgresql" | "pg" => Ok(DbKind::Postgres),
                "sqlite" | "sqlite_file" => Ok(DbKind::SqliteFile),
                "memory" | "sqlite_memory" => Ok(DbKind::SqliteMemory),
                other => Err(AppError::config(format!(
                    "ROSHAMBO_DB_KIND must be postgres, sqlite or memory, got '{other}'"
                ))),
            },
        }
    }
}

/// Builds a database URL from environment variables based on profile and kind
pub fn db_url(profile: DbProfile, kind: DbKind) -> Result<String, AppError> {
    match kind {
        DbKind::Postgres => {
            let host = host();
            let port = port();
            let db_name = db_name(profile)?;
            let (username, password) = credentials()?;
            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
        DbKind::SqliteFile => {
            let file = sqlite_dir()?.join(sqlite_file_name(profile));
            Ok(format!("sqlite://{}?mode=rwc", file.display()))
        }
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
    }
}

/// Get database host from environment (defaults to localhost)
fn host() -> String {
    env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string())
}

/// Get database port from environment (defaults to 5432)
fn port() -> String {
    env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string())
}

/// Get database name based on profile
fn db_name(profile: DbProfile) -> Result<String, AppError> {
    match profile {
        DbProfile::Prod => must_var("PROD_DB"),
        DbProfile::Test => {
            let db_name = must_var("TEST_DB")?;
            // Test DB must end with "_test"
            if !db_name.ends_with("_test") {
                return Err(AppError::config(format!(
                    "Test profile requires database name to end with '_test', but got: '{db_name}'"
                )));
            }
            Ok(db_name)
        }
    }
}

fn credentials() -> Result<(String, String), AppError> {
    let username = must_var("APP_DB_USER")?;
    let password = must_var("APP_DB_PASSWORD")?;
    Ok((username, password))
}

fn sqlite_dir() -> Result<PathBuf, AppError> {
    let dir = must_var("SQLITE_DB_DIR")?;
    if dir.trim().is_empty() {
        return Err(AppError::config("SQLITE_DB_DIR must not be empty"));
    }
    Ok(PathBuf::from(dir))
}

fn sqlite_file_name(profile: DbProfile) -> &'static str {
    match profile {
        DbProfile::Prod => "roshambo.db",
        DbProfile::Test => "roshambo_test.db",
    }
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
