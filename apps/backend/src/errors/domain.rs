//! Domain-level error type used across services, repos and adapters.
//!
//! This error type is transport- and DB-agnostic. Outer layers convert it
//! into `crate::error::AppError` via the provided `From` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::domain::errors::GameError;

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    DataCorruption,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    User,
    Game,
    Other(String),
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// Player already submitted a decision for the current turn
    AlreadyDecided,
    /// Conditional join write lost, and the game is no longer waiting for players
    GameNotJoinable,
    /// Conditional write lost against a concurrent writer
    OptimisticLock,
    UniqueLogin,
    DuplicateId,
    Other(String),
}

/// Validation kinds: the request is well-formed but not allowed right now
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    InvalidState,
    TurnNotReady,
    NotAParticipant,
    AlreadyJoined,
    InvalidTurnsCount,
    InvalidPage,
    ParseDecision,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input validation or business rule violation
    Validation(ValidationKind, String),
    /// Semantic conflict
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    pub fn is_conflict(&self, kind: &ConflictKind) -> bool {
        matches!(self, DomainError::Conflict(k, _) if k == kind)
    }
}

impl From<GameError> for DomainError {
    fn from(e: GameError) -> Self {
        let detail = e.to_string();
        match e {
            GameError::InvalidState { .. } => {
                DomainError::validation(ValidationKind::InvalidState, detail)
            }
            GameError::TurnNotReady => DomainError::validation(ValidationKind::TurnNotReady, detail),
            GameError::AlreadyDecided { .. } => {
                DomainError::conflict(ConflictKind::AlreadyDecided, detail)
            }
            GameError::NotAParticipant { .. } => {
                DomainError::validation(ValidationKind::NotAParticipant, detail)
            }
            GameError::AlreadyJoined { .. } => {
                DomainError::validation(ValidationKind::AlreadyJoined, detail)
            }
            GameError::InvalidTurnsCount(_) => {
                DomainError::validation(ValidationKind::InvalidTurnsCount, detail)
            }
            GameError::CorruptState(_) => {
                DomainError::infra(InfraErrorKind::DataCorruption, detail)
            }
        }
    }
}
