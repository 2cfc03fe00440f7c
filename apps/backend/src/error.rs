use thiserror::Error;

use crate::domain::errors::GameError;
use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: &'static str, detail: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: &'static str, detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: &'static str, detail: String },
    #[error("Database unavailable: {detail}")]
    DbUnavailable { detail: String },
}

impl AppError {
    /// Stable machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::Db { .. } => "DB_ERROR",
            AppError::NotFound { code, .. } => *code,
            AppError::Internal { .. } => "INTERNAL",
            AppError::Config { .. } => "CONFIG_ERROR",
            AppError::Conflict { code, .. } => *code,
            AppError::DbUnavailable { .. } => "DB_UNAVAILABLE",
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            AppError::Validation { detail, .. }
            | AppError::Db { detail }
            | AppError::NotFound { detail, .. }
            | AppError::Internal { detail }
            | AppError::Config { detail }
            | AppError::Conflict { detail, .. }
            | AppError::DbUnavailable { detail } => detail,
        }
    }

    pub fn invalid(code: &'static str, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn not_found(code: &'static str, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn conflict(code: &'static str, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(kind, detail) => {
                let code = match kind {
                    ValidationKind::InvalidState => "INVALID_GAME_STATE",
                    ValidationKind::TurnNotReady => "TURN_NOT_READY",
                    ValidationKind::NotAParticipant => "NOT_A_PARTICIPANT",
                    ValidationKind::AlreadyJoined => "ALREADY_JOINED",
                    ValidationKind::InvalidTurnsCount => "INVALID_TURNS_COUNT",
                    ValidationKind::InvalidPage => "INVALID_PAGE",
                    ValidationKind::ParseDecision => "PARSE_DECISION",
                    _ => "VALIDATION_ERROR",
                };
                AppError::invalid(code, detail)
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::AlreadyDecided => "ALREADY_DECIDED",
                    ConflictKind::GameNotJoinable => "GAME_NOT_JOINABLE",
                    ConflictKind::OptimisticLock => "OPTIMISTIC_LOCK",
                    ConflictKind::UniqueLogin => "UNIQUE_LOGIN",
                    ConflictKind::DuplicateId => "DUPLICATE_ID",
                    _ => "CONFLICT",
                };
                AppError::conflict(code, detail)
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::User => "USER_NOT_FOUND",
                    NotFoundKind::Game => "GAME_NOT_FOUND",
                    _ => "NOT_FOUND",
                };
                AppError::not_found(code, detail)
            }
            DomainError::Infra(InfraErrorKind::DbUnavailable, detail) => {
                AppError::DbUnavailable { detail }
            }
            DomainError::Infra(InfraErrorKind::Timeout, detail) => AppError::Db { detail },
            DomainError::Infra(_, detail) => AppError::internal(detail),
        }
    }
}

impl From<GameError> for AppError {
    fn from(err: GameError) -> Self {
        AppError::from(DomainError::from(err))
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::from(DomainError::from(err))
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}
