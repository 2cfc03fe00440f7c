//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; repos convert it into
//! `crate::errors::domain::DomainError` here, and the outer layer maps
//! `DomainError` to `AppError` via `From`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

fn is_unique_violation(msg: &str) -> bool {
    mentions_sqlstate(msg, "23505")
        || msg.contains("duplicate key value violates unique constraint")
        || msg.contains("UNIQUE constraint failed")
}

/// Map a unique violation to a domain conflict. SQLite names the columns
/// (`users.login`), Postgres names the constraint (`idx_users_login_unique`).
fn unique_violation_to_conflict(msg: &str) -> Option<(ConflictKind, &'static str)> {
    if msg.contains("users.login") || msg.contains("idx_users_login_unique") {
        return Some((ConflictKind::UniqueLogin, "Login already taken"));
    }
    if msg.contains("game_turns.turn_number") || msg.contains("ux_game_turns_game_turn") {
        return Some((
            ConflictKind::OptimisticLock,
            "Turn already recorded for this game",
        ));
    }
    if msg.contains("games.id")
        || msg.contains("games_pkey")
        || msg.contains("game_turns.id")
        || msg.contains("game_turns_pkey")
        || msg.contains("users.id")
        || msg.contains("users_pkey")
    {
        return Some((ConflictKind::DuplicateId, "Id already present"));
    }
    None
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();

    match &e {
        sea_orm::DbErr::RecordNotFound(what) => {
            return DomainError::not_found(NotFoundKind::Other(what.clone()), "Record not found");
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        sea_orm::DbErr::Json(_) | sea_orm::DbErr::Type(_) => {
            error!(raw_error = %error_msg, "Stored document could not be decoded");
            return DomainError::infra(
                InfraErrorKind::DataCorruption,
                "Stored document could not be decoded",
            );
        }
        _ => {}
    }

    if is_unique_violation(&error_msg) {
        warn!(raw_error = %error_msg, "Unique constraint violation");
        if let Some((kind, detail)) = unique_violation_to_conflict(&error_msg) {
            return DomainError::conflict(kind, detail);
        }
        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if error_msg.contains("timeout")
        || error_msg.contains("pool")
        || error_msg.contains("unavailable")
        || error_msg.contains("database is locked")
    {
        warn!(raw_error = %error_msg, "Database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e)
    }
}
