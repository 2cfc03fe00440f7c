use std::time::Duration;

use migration::MigrationCommand;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbKind, DbProfile};
use crate::error::AppError;

fn engine(kind: DbKind) -> &'static str {
    match kind {
        DbKind::Postgres => "postgresql",
        DbKind::SqliteFile | DbKind::SqliteMemory => "sqlite",
    }
}

/// Open a pool for `profile`/`kind`. Does NOT run any migrations.
///
/// In-memory SQLite is pinned to a single connection: every connection
/// would otherwise see its own empty database.
pub async fn connect_db(profile: DbProfile, kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let url = db_url(profile, kind)?;

    let mut opts = ConnectOptions::new(url);
    opts.connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    match kind {
        DbKind::SqliteMemory => {
            opts.max_connections(1).min_connections(1);
        }
        DbKind::SqliteFile => {
            opts.max_connections(4);
        }
        DbKind::Postgres => {
            opts.max_connections(16);
        }
    }

    let conn = Database::connect(opts).await?;
    info!(engine = engine(kind), profile = ?profile, "Database connected");
    Ok(conn)
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db(
    profile: DbProfile,
    kind: DbKind,
) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(profile, kind).await?;
    migration::migrate(&conn, MigrationCommand::Up).await?;
    Ok(conn)
}
